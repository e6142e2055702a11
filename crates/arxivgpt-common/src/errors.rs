use std::path::PathBuf;

use crate::id::SessionKey;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures of the flat JSON session store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session store is malformed: {0}")]
    Parse(String),

    #[error("session store not found: {0}")]
    Missing(PathBuf),

    #[error("session {0} not found")]
    NotFound(SessionKey),

    #[error("session {0} already exists in the store")]
    KeyCollision(SessionKey),
}

#[derive(Debug, thiserror::Error)]
pub enum ArxivGptError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("corpus error: {0}")]
    Corpus(String),

    #[error("assistant error: {0}")]
    Assistant(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("{0}")]
    Other(String),
}
