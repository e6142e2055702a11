pub mod errors;
pub mod id;

pub use errors::{ArxivGptError, ConfigError, StoreError};
pub use id::{ParseSessionKeyError, SessionKey};

pub type Result<T> = std::result::Result<T, ArxivGptError>;
