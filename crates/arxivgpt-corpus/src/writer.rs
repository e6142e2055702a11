//! Corpus file output.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::{CorpusError, Paper};

pub const CORPUS_FILE_NAME: &str = "arxiv_data.json";

/// Write `papers` to `<folder>/arxiv_data.json` as a four-space indented
/// JSON array, creating the folder if needed.
pub fn write_corpus(folder: &Path, papers: &[Paper]) -> Result<PathBuf, CorpusError> {
    std::fs::create_dir_all(folder)?;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    papers
        .serialize(&mut ser)
        .map_err(|e| CorpusError::Parse(e.to_string()))?;

    let path = folder.join(CORPUS_FILE_NAME);
    std::fs::write(&path, buf)?;

    info!(path = %path.display(), count = papers.len(), "corpus written");
    Ok(path)
}
