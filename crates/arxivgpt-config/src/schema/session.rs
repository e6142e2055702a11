//! Session store, transcript and turn-loop settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub store_path: String,
    pub transcript_dir: String,
    /// Delay between run status checks (valid range: 10-60000).
    pub poll_interval_ms: u32,
    /// Status checks before a run is abandoned; 0 polls until terminal.
    pub poll_max_attempts: u32,
    pub exit_keywords: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: "arxiv_sessions.json".into(),
            transcript_dir: ".".into(),
            poll_interval_ms: 1000,
            poll_max_attempts: 300,
            exit_keywords: vec!["exit".into(), "exit.".into()],
        }
    }
}

impl SessionConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_interval_ms))
    }

    /// `None` means no limit.
    pub fn max_poll_attempts(&self) -> Option<u32> {
        (self.poll_max_attempts > 0).then_some(self.poll_max_attempts)
    }
}
