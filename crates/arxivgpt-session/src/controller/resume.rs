//! Listing and reopening stored sessions.

use std::path::PathBuf;

use tracing::{debug, info};

use arxivgpt_common::{ParseSessionKeyError, SessionKey, StoreError};

use super::SessionController;
use crate::model::{Session, SessionSummary};

#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    #[error(transparent)]
    InvalidKey(#[from] ParseSessionKeyError),

    #[error("no sessions available ({})", .0.display())]
    NoSessions(PathBuf),

    #[error("session {0} not found")]
    NotFound(SessionKey),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ResumeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Missing(path) => Self::NoSessions(path),
            StoreError::NotFound(key) => Self::NotFound(key),
            other => Self::Store(other),
        }
    }
}

impl SessionController<'_> {
    /// Stored sessions ordered by key; empty when there is no store yet.
    pub fn list_sessions(&self) -> Result<Vec<SessionSummary>, StoreError> {
        self.ctx.store.list()
    }

    /// Parse `key_text` and load that session.
    pub fn resume(&self, key_text: &str) -> Result<(SessionKey, Session), ResumeError> {
        let key: SessionKey = key_text.parse()?;
        debug!(session = %key, "Resuming session");
        let session = self.ctx.store.load(key)?;
        info!(session = %key, name = %session.display_name, "Session loaded");
        Ok((key, session))
    }
}
