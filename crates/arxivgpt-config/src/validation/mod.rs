//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod assistant;
mod corpus;
mod helpers;
mod session;


use crate::schema::ArxivGptConfig;
use arxivgpt_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ArxivGptConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    assistant::validate_assistant(&mut errors, config);
    corpus::validate_corpus(&mut errors, config);
    session::validate_session(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
