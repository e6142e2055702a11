//! Configuration schema types for arxiv-gpt.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod assistant;
mod corpus;
mod logging;
mod session;

pub use assistant::*;
pub use corpus::*;
pub use logging::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Root configuration for arxiv-gpt.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArxivGptConfig {
    pub assistant: AssistantConfig,
    pub corpus: CorpusConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}
