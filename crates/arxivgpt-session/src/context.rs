//! Collaborators and settings shared by every session operation.

use std::path::PathBuf;
use std::sync::Arc;

use arxivgpt_ai::{AssistantRegistry, DocumentStore};
use arxivgpt_corpus::CorpusProvider;

use crate::poll::{PollPolicy, Sleeper};
use crate::store::SessionStore;

/// Settings for bootstrapping and chatting.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Model for newly created assistants.
    pub model: String,
    /// Where the corpus is written and uploaded from.
    pub corpus_folder: PathBuf,
    pub transcript_dir: PathBuf,
    pub poll: PollPolicy,
    /// Compared case-insensitively against the trimmed input line.
    pub exit_keywords: Vec<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo-1106".into(),
            corpus_folder: PathBuf::from("ARXIV"),
            transcript_dir: PathBuf::from("."),
            poll: PollPolicy::default(),
            exit_keywords: vec!["exit".into(), "exit.".into()],
        }
    }
}

/// Everything a [`crate::SessionController`] talks to.
pub struct AppContext {
    pub corpus: Arc<dyn CorpusProvider>,
    pub registry: Arc<dyn AssistantRegistry>,
    pub documents: Arc<dyn DocumentStore>,
    pub sleeper: Arc<dyn Sleeper>,
    pub store: SessionStore,
    pub settings: SessionSettings,
}
