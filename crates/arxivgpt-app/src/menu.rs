//! The interactive start menu: new session or resume, then chat.

use std::io::{BufRead, Write};

use tracing::{error, info, warn};

use arxivgpt_common::ArxivGptError;
use arxivgpt_corpus::CorpusQuery;
use arxivgpt_session::{LoopSummary, ResumeError, Session, SessionController};

const BANNER: &str =
    "\n------------------------------ Welcome to Arxiv GPT! ------------------------------\n";

/// Run one menu pass. Returns the chat summary when a chat took place.
pub async fn run<R: BufRead, W: Write>(
    controller: &SessionController<'_>,
    query: &CorpusQuery,
    mut input: R,
    mut output: W,
) -> Result<Option<LoopSummary>, ArxivGptError> {
    writeln!(output, "{BANNER}")?;
    let choice = prompt(
        &mut input,
        &mut output,
        "Type 'n' to make a new agent. Press 'Enter' to choose an existing session. ",
    )?;

    let session = if choice.eq_ignore_ascii_case("n") {
        new_session(controller, query, &mut input, &mut output).await?
    } else {
        existing_session(controller, &mut input, &mut output)?
    };

    let Some(session) = session else {
        return Ok(None);
    };
    let summary = controller
        .chat(&session, &mut input, &mut output)
        .await
        .map_err(|e| ArxivGptError::Session(e.to_string()))?;
    Ok(Some(summary))
}

async fn new_session<R: BufRead, W: Write>(
    controller: &SessionController<'_>,
    query: &CorpusQuery,
    input: &mut R,
    output: &mut W,
) -> Result<Option<Session>, ArxivGptError> {
    let name = prompt(
        input,
        output,
        "Type a Name for this Assistant (usually today's date is best): ",
    )?;
    if name.is_empty() {
        writeln!(output, "A name is required.")?;
        return Ok(None);
    }

    match controller.bootstrap(query, &name).await {
        Ok((key, session)) => {
            info!(
                session = %key,
                assistant_id = %session.assistant_id,
                thread_id = %session.thread_id,
                "Created session with {name}"
            );
            writeln!(
                output,
                "Please tell the assistant what specific subject you want to focus on."
            )?;
            Ok(Some(session))
        }
        Err(e) => {
            error!(error = %e, "Could not create a session");
            writeln!(output, "Could not create a session: {e}")?;
            Ok(None)
        }
    }
}

fn existing_session<R: BufRead, W: Write>(
    controller: &SessionController<'_>,
    input: &mut R,
    output: &mut W,
) -> Result<Option<Session>, ArxivGptError> {
    let sessions = controller.list_sessions()?;
    if sessions.is_empty() {
        writeln!(output, "No sessions available.")?;
        return Ok(None);
    }

    writeln!(output, "Available Sessions:")?;
    for summary in &sessions {
        writeln!(output, "Session {}: {}", summary.key, summary.display_name)?;
    }

    let chosen = prompt(input, output, "Enter the session number to load: ")?;
    match controller.resume(&chosen) {
        Ok((key, session)) if !session.is_bound() => {
            warn!(session = %key, "Stored session has no assistant or thread");
            writeln!(
                output,
                "Session {key} has no assistant or thread and cannot be resumed."
            )?;
            Ok(None)
        }
        Ok((key, session)) => {
            info!(
                session = %key,
                assistant_id = %session.assistant_id,
                thread_id = %session.thread_id,
                "Started a session with {}",
                session.display_name
            );
            Ok(Some(session))
        }
        Err(ResumeError::NoSessions(_)) => {
            writeln!(output, "No sessions available.")?;
            Ok(None)
        }
        Err(ResumeError::InvalidKey(_) | ResumeError::NotFound(_)) => {
            writeln!(output, "Session not found.")?;
            Ok(None)
        }
        Err(ResumeError::Store(e)) => Err(e.into()),
    }
}

/// Print `text` and read one trimmed line. End of input reads as empty.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> std::io::Result<String> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut raw = Vec::new();
    input.read_until(b'\n', &mut raw)?;
    Ok(String::from_utf8_lossy(&raw).trim().to_string())
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use arxivgpt_ai::{
        AssistantError, AssistantRegistry, AssistantSpec, DocumentStore, Run, RunStatus, Turn,
    };
    use arxivgpt_corpus::{CorpusError, CorpusProvider, Paper};
    use arxivgpt_session::{AppContext, SessionSettings, SessionStore, Sleeper};

    use super::*;

    /// Answers every call with a canned reply and an empty corpus.
    struct Canned;

    #[async_trait]
    impl CorpusProvider for Canned {
        async fn fetch(&self, _query: &CorpusQuery) -> Result<Vec<Paper>, CorpusError> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl DocumentStore for Canned {
        async fn upload(&self, _path: &Path) -> Result<String, AssistantError> {
            Ok("file-1".into())
        }
    }

    #[async_trait]
    impl AssistantRegistry for Canned {
        async fn create_assistant(&self, _spec: &AssistantSpec) -> Result<String, AssistantError> {
            Ok("asst_1".into())
        }
        async fn attach_file(&self, _a: &str, _f: &str) -> Result<(), AssistantError> {
            Ok(())
        }
        async fn create_thread(&self) -> Result<String, AssistantError> {
            Ok("thread_1".into())
        }
        async fn send_message(
            &self,
            _thread_id: &str,
            _content: &str,
            _file_ids: &[String],
        ) -> Result<String, AssistantError> {
            Ok("msg_1".into())
        }
        async fn create_run(&self, _t: &str, _a: &str) -> Result<Run, AssistantError> {
            Ok(Run {
                id: "run_1".into(),
                status: RunStatus::Completed,
            })
        }
        async fn retrieve_run(&self, _t: &str, run_id: &str) -> Result<Run, AssistantError> {
            Ok(Run {
                id: run_id.into(),
                status: RunStatus::Completed,
            })
        }
        async fn list_messages(&self, _t: &str) -> Result<Vec<Turn>, AssistantError> {
            Ok(vec![Turn::assistant("Try 2312.00001."), Turn::user("hi")])
        }
    }

    #[async_trait]
    impl Sleeper for Canned {
        async fn sleep(&self, _duration: std::time::Duration) {}
    }

    fn context(dir: &Path) -> AppContext {
        let canned = Arc::new(Canned);
        AppContext {
            corpus: canned.clone(),
            registry: canned.clone(),
            documents: canned.clone(),
            sleeper: canned,
            store: SessionStore::new(dir.join("arxiv_sessions.json")),
            settings: SessionSettings {
                corpus_folder: dir.join("ARXIV"),
                transcript_dir: dir.to_path_buf(),
                ..Default::default()
            },
        }
    }

    fn query() -> CorpusQuery {
        let day = NaiveDate::from_ymd_opt(2023, 12, 16).unwrap();
        CorpusQuery::new("cs.AI", day, day)
    }

    async fn run_menu(
        ctx: &AppContext,
        input: impl AsRef<[u8]>,
    ) -> (Option<LoopSummary>, String) {
        let controller = SessionController::new(ctx);
        let mut output = Vec::new();
        let summary = run(&controller, &query(), input.as_ref(), &mut output)
            .await
            .unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn resume_without_store_reports_no_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let (summary, output) = run_menu(&ctx, "\n").await;

        assert!(summary.is_none());
        assert!(output.contains("No sessions available."));
        assert!(!output.contains("You: "));
    }

    #[tokio::test]
    async fn unknown_session_number_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        ctx.store
            .save(&Session::new("asst_1", "thread_1", "Dec16", Vec::new()))
            .unwrap();

        let (summary, output) = run_menu(&ctx, "\n7\n").await;

        assert!(summary.is_none());
        assert!(output.contains("Available Sessions:\nSession 1: Dec16\n"));
        assert!(output.contains("Session not found."));
    }

    #[tokio::test]
    async fn new_session_then_chat() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let (summary, output) = run_menu(&ctx, "n\nDec16\nhi\nexit\n").await;

        let summary = summary.unwrap();
        assert_eq!(summary.outcomes.len(), 1);
        assert!(output.contains("Dec16: Try 2312.00001.\n"));
        assert_eq!(ctx.store.len().unwrap(), 1);
        assert_eq!(
            summary.transcript,
            Some(dir.path().join("Dec16_message_log.txt"))
        );
    }

    #[tokio::test]
    async fn resumed_session_chats() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        ctx.store
            .save(&Session::new("asst_1", "thread_1", "Dec16", Vec::new()))
            .unwrap();

        let (summary, output) = run_menu(&ctx, "\n1\nexit\n").await;

        assert!(summary.unwrap().outcomes.is_empty());
        assert!(output.contains("Messages saved to "));
    }

    #[tokio::test]
    async fn session_without_ids_is_not_resumed() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        std::fs::write(
            dir.path().join("arxiv_sessions.json"),
            r#"{"sessions": {"1": {"Assistant ID": null, "Thread ID": null,
                "User Name Input": "Old", "File IDs": []}}}"#,
        )
        .unwrap();

        let (summary, output) = run_menu(&ctx, "\n1\n").await;

        assert!(summary.is_none());
        assert!(output.contains("Session 1: Old\n"));
        assert!(output.contains("Session 1 has no assistant or thread and cannot be resumed."));
        assert!(!output.contains("You: "));
    }

    #[tokio::test]
    async fn undecodable_session_choice_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        ctx.store
            .save(&Session::new("asst_1", "thread_1", "Dec16", Vec::new()))
            .unwrap();

        let (summary, output) = run_menu(&ctx, b"\n\xff\n").await;

        assert!(summary.is_none());
        assert!(output.contains("Session not found."));
    }
}
