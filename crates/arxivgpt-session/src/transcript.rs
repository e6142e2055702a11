//! Plain-text conversation transcripts.

use std::path::{Path, PathBuf};

use arxivgpt_ai::{Role, Turn};

/// `<display name>_message_log.txt`, with path separators replaced.
pub fn transcript_file_name(display_name: &str) -> String {
    let stem: String = display_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{stem}_message_log.txt")
}

/// One line per turn, oldest first. `newest_first` is the registry's order.
pub fn render_transcript(display_name: &str, newest_first: &[Turn]) -> String {
    let mut out = String::new();
    for turn in newest_first.iter().rev() {
        let speaker = match turn.role {
            Role::Assistant => display_name,
            Role::User => "You",
        };
        out.push_str(speaker);
        out.push_str(": ");
        out.push_str(&turn.content);
        out.push('\n');
    }
    out
}

pub fn write_transcript(
    dir: &Path,
    display_name: &str,
    newest_first: &[Turn],
) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(transcript_file_name(display_name));
    std::fs::write(&path, render_transcript(display_name, newest_first))?;
    Ok(path)
}
