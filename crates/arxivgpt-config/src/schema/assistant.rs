//! Hosted assistant service settings.

use serde::{Deserialize, Serialize};

/// Model and endpoint used for the research assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub model: String,
    pub api_base: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Per-request timeout in seconds (valid range: 1-600).
    pub request_timeout_secs: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo-1106".into(),
            api_base: "https://api.openai.com/v1".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            request_timeout_secs: 120,
        }
    }
}
