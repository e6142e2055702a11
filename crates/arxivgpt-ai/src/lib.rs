//! Hosted assistant service for arxiv-gpt.
//!
//! Defines the two remote collaborators of a session:
//! - [`DocumentStore`]: uploads local files, returning opaque file handles
//! - [`AssistantRegistry`]: assistants, threads, messages and runs
//!
//! [`OpenAiClient`] implements both against the OpenAI Assistants API.

pub mod instructions;
pub mod openai;

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use instructions::instructions_for;
pub use openai::{OpenAiClient, OpenAiConfig};

/// Uploads local files and hands back remote file ids.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn upload(&self, path: &Path) -> Result<String, AssistantError>;
}

/// Remote assistants, conversation threads and runs.
#[async_trait]
pub trait AssistantRegistry: Send + Sync {
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<String, AssistantError>;

    async fn attach_file(&self, assistant_id: &str, file_id: &str) -> Result<(), AssistantError>;

    async fn create_thread(&self) -> Result<String, AssistantError>;

    /// Post a user message carrying `file_ids`; returns the message id.
    async fn send_message(
        &self,
        thread_id: &str,
        content: &str,
        file_ids: &[String],
    ) -> Result<String, AssistantError>;

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run, AssistantError>;

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AssistantError>;

    /// Every turn on the thread, newest first.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Turn>, AssistantError>;
}

/// Tools enabled on a new assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Capability {
    Retrieval,
    CodeInterpreter,
}

/// Everything needed to create an assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantSpec {
    pub name: String,
    pub instructions: String,
    pub model: String,
    pub capabilities: Vec<Capability>,
}

impl AssistantSpec {
    /// The research assistant persona: named, instructed to work from the
    /// uploaded corpus, with retrieval and code execution enabled.
    pub fn research(name: impl Into<String>, model: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            instructions: instructions_for(&name),
            name,
            model: model.into(),
            capabilities: vec![Capability::Retrieval, Capability::CodeInterpreter],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message on a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Lifecycle state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Still waiting on the service: `queued` or `in_progress`.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Queued | Self::InProgress)
    }
}

/// One execution of an assistant against a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not configured: {0}")]
    NotConfigured(String),
}

impl From<AssistantError> for arxivgpt_common::ArxivGptError {
    fn from(err: AssistantError) -> Self {
        Self::Assistant(err.to_string())
    }
}
