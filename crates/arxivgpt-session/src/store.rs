//! Flat JSON session store.
//!
//! The whole file is read into memory and rewritten on every save:
//!
//! ```json
//! { "sessions": { "1": { "Assistant ID": "...", ... } } }
//! ```

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use arxivgpt_common::{SessionKey, StoreError};

use crate::model::{Session, SessionSummary};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    sessions: BTreeMap<SessionKey, Session>,
}

/// Handle to the session file at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All sessions ordered by key. A missing file lists nothing.
    pub fn list(&self) -> Result<Vec<SessionSummary>, StoreError> {
        let Some(file) = self.read()? else {
            return Ok(Vec::new());
        };
        Ok(file
            .sessions
            .into_iter()
            .map(|(key, session)| SessionSummary {
                key,
                display_name: session.display_name,
            })
            .collect())
    }

    /// Number of stored sessions; 0 for a missing file.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.map_or(0, |file| file.sessions.len()))
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|n| n == 0)
    }

    pub fn load(&self, key: SessionKey) -> Result<Session, StoreError> {
        let file = self
            .read()?
            .ok_or_else(|| StoreError::Missing(self.path.clone()))?;
        file.sessions
            .get(&key)
            .cloned()
            .ok_or(StoreError::NotFound(key))
    }

    /// Append `session` under key `count + 1` and rewrite the file.
    pub fn save(&self, session: &Session) -> Result<SessionKey, StoreError> {
        let mut file = self.read()?.unwrap_or_default();
        let key = SessionKey::for_count(file.sessions.len());
        if file.sessions.contains_key(&key) {
            return Err(StoreError::KeyCollision(key));
        }
        file.sessions.insert(key, session.clone());
        self.write(&file)?;
        info!(session = %key, path = %self.path.display(), "Session saved");
        Ok(key)
    }

    fn read(&self) -> Result<Option<StoreFile>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session store yet");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    fn write(&self, file: &StoreFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        file.serialize(&mut ser)
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        std::fs::write(&self.path, buf)?;
        Ok(())
    }
}
