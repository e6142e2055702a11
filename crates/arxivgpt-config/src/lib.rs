//! arxiv-gpt configuration system.
//!
//! TOML-based configuration with full validation. All config sections use
//! serde defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use arxivgpt_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::ArxivGptConfig;

use std::path::Path;

use arxivgpt_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`.
///
/// The default file is created from the commented template if it does not
/// exist yet. The result is validated; validation failures are returned.
pub fn load_config(path: Option<&Path>) -> Result<ArxivGptConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Pretty JSON rendering of the effective config, for debug logging.
pub fn config_to_json(config: &ArxivGptConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
