//! In-memory collaborators for session tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use arxivgpt_ai::{
    AssistantError, AssistantRegistry, AssistantSpec, DocumentStore, Run, RunStatus, Turn,
};
use arxivgpt_corpus::{CorpusError, CorpusProvider, CorpusQuery, Paper};

use crate::poll::Sleeper;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub thread_id: String,
    pub content: String,
    pub file_ids: Vec<String>,
}

#[derive(Default)]
struct RegistryState {
    statuses: VecDeque<RunStatus>,
    history: Vec<Turn>,
    assistants: Vec<AssistantSpec>,
    attached: Vec<(String, String)>,
    threads: u32,
    runs: u32,
    sent: Vec<SentMessage>,
}

/// Scripted assistant registry.
///
/// `retrieve_run` pops the next scripted status (completed once the script
/// runs out); `list_messages` returns the scripted history, newest first.
#[derive(Default)]
pub struct MockRegistry {
    state: Mutex<RegistryState>,
    fail_assistant: bool,
    fail_send: bool,
    fail_run: bool,
    fail_retrieve: bool,
    fail_list: bool,
}

impl MockRegistry {
    pub fn with_statuses(self, statuses: &[RunStatus]) -> Self {
        self.state.lock().unwrap().statuses = statuses.iter().copied().collect();
        self
    }

    /// Thread history, newest first.
    pub fn with_history(self, history: Vec<Turn>) -> Self {
        self.state.lock().unwrap().history = history;
        self
    }

    pub fn failing_assistant(mut self) -> Self {
        self.fail_assistant = true;
        self
    }

    pub fn failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    pub fn failing_run(mut self) -> Self {
        self.fail_run = true;
        self
    }

    pub fn failing_retrieve(mut self) -> Self {
        self.fail_retrieve = true;
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn assistants(&self) -> Vec<AssistantSpec> {
        self.state.lock().unwrap().assistants.clone()
    }

    pub fn attached(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().attached.clone()
    }

    pub fn threads_created(&self) -> u32 {
        self.state.lock().unwrap().threads
    }

    pub fn runs_created(&self) -> u32 {
        self.state.lock().unwrap().runs
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.state.lock().unwrap().sent.clone()
    }
}

fn offline() -> AssistantError {
    AssistantError::NetworkError("connection refused".into())
}

#[async_trait]
impl AssistantRegistry for MockRegistry {
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<String, AssistantError> {
        if self.fail_assistant {
            return Err(AssistantError::ApiError("HTTP 400: invalid model".into()));
        }
        let mut state = self.state.lock().unwrap();
        state.assistants.push(spec.clone());
        Ok(format!("asst_{}", state.assistants.len()))
    }

    async fn attach_file(&self, assistant_id: &str, file_id: &str) -> Result<(), AssistantError> {
        self.state
            .lock()
            .unwrap()
            .attached
            .push((assistant_id.to_string(), file_id.to_string()));
        Ok(())
    }

    async fn create_thread(&self) -> Result<String, AssistantError> {
        let mut state = self.state.lock().unwrap();
        state.threads += 1;
        Ok(format!("thread_{}", state.threads))
    }

    async fn send_message(
        &self,
        thread_id: &str,
        content: &str,
        file_ids: &[String],
    ) -> Result<String, AssistantError> {
        if self.fail_send {
            return Err(offline());
        }
        let mut state = self.state.lock().unwrap();
        state.sent.push(SentMessage {
            thread_id: thread_id.to_string(),
            content: content.to_string(),
            file_ids: file_ids.to_vec(),
        });
        Ok(format!("msg_{}", state.sent.len()))
    }

    async fn create_run(&self, _thread_id: &str, _assistant_id: &str) -> Result<Run, AssistantError> {
        if self.fail_run {
            return Err(offline());
        }
        let mut state = self.state.lock().unwrap();
        state.runs += 1;
        Ok(Run {
            id: format!("run_{}", state.runs),
            status: RunStatus::Queued,
        })
    }

    async fn retrieve_run(&self, _thread_id: &str, run_id: &str) -> Result<Run, AssistantError> {
        if self.fail_retrieve {
            return Err(offline());
        }
        let status = self
            .state
            .lock()
            .unwrap()
            .statuses
            .pop_front()
            .unwrap_or(RunStatus::Completed);
        Ok(Run {
            id: run_id.to_string(),
            status,
        })
    }

    async fn list_messages(&self, _thread_id: &str) -> Result<Vec<Turn>, AssistantError> {
        if self.fail_list {
            return Err(offline());
        }
        Ok(self.state.lock().unwrap().history.clone())
    }
}

/// Hands out `file-1`, `file-2`, ... in upload order.
#[derive(Default)]
pub struct MockDocuments {
    uploaded: Mutex<Vec<PathBuf>>,
    fail: bool,
}

impl MockDocuments {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn uploaded(&self) -> Vec<PathBuf> {
        self.uploaded.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for MockDocuments {
    async fn upload(&self, path: &Path) -> Result<String, AssistantError> {
        if self.fail {
            return Err(AssistantError::ApiError("HTTP 413: file too large".into()));
        }
        let mut uploaded = self.uploaded.lock().unwrap();
        uploaded.push(path.to_path_buf());
        Ok(format!("file-{}", uploaded.len()))
    }
}

/// Returns fixed papers and writes each one to its own file.
#[derive(Default)]
pub struct MockCorpus {
    papers: Vec<Paper>,
    fail: bool,
    queries: Mutex<Vec<CorpusQuery>>,
}

impl MockCorpus {
    pub fn with_papers(papers: Vec<Paper>) -> Self {
        Self {
            papers,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<CorpusQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CorpusProvider for MockCorpus {
    async fn fetch(&self, query: &CorpusQuery) -> Result<Vec<Paper>, CorpusError> {
        self.queries.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(CorpusError::RateLimited {
                retry_after: Some(10),
            });
        }
        Ok(self.papers.clone())
    }

    fn persist(&self, papers: &[Paper], folder: &Path) -> Result<(), CorpusError> {
        std::fs::create_dir_all(folder)?;
        for paper in papers {
            let json =
                serde_json::to_string(paper).map_err(|e| CorpusError::Parse(e.to_string()))?;
            std::fs::write(folder.join(format!("{}.json", paper.id)), json)?;
        }
        Ok(())
    }
}

pub fn paper(id: &str) -> Paper {
    Paper {
        id: id.to_string(),
        title: format!("Paper {id}"),
        abstract_text: "An abstract.".into(),
        doi: String::new(),
        created: "2023-12-16".into(),
        url: format!("https://arxiv.org/abs/{id}"),
        authors: vec!["Jane Doe".into()],
    }
}

/// Records requested sleeps without waiting.
#[derive(Default)]
pub struct RecordingSleeper {
    calls: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn calls(&self) -> Vec<Duration> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.calls.lock().unwrap().push(duration);
    }
}
