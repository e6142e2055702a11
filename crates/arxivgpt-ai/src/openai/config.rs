//! OpenAI client configuration.

use std::fmt;
use std::time::Duration;

use crate::AssistantError;

pub(crate) const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI API client configuration.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_base: String,
    pub request_timeout: Duration,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(120),
        }
    }

    /// Read the API key from `key_var` (normally `OPENAI_API_KEY`).
    ///
    /// `OPENAI_BASE_URL`, when set, overrides the API base.
    pub fn from_env(key_var: &str) -> Result<Self, AssistantError> {
        let key = std::env::var(key_var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AssistantError::NotConfigured(format!(
                    "OpenAI API key not found. Set {key_var} in the environment or a .env file."
                ))
            })?;

        let mut config = Self::new(key);
        if let Ok(base) = std::env::var("OPENAI_BASE_URL") {
            config = config.with_api_base(base);
        }
        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
