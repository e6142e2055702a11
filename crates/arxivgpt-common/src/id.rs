use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequential session number.
///
/// Persisted and displayed in string form (`"1"`, `"2"`, ...) but ordered
/// numerically, so `"10"` sorts after `"9"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionKey(u32);

impl SessionKey {
    /// Returns `None` for zero; session numbers start at 1.
    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// The key assigned to the next session when `count` sessions exist.
    pub fn for_count(count: usize) -> Self {
        let value = u32::try_from(count).map_or(u32::MAX, |c| c.saturating_add(1));
        Self(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid session number: {0:?}")]
pub struct ParseSessionKeyError(pub String);

impl FromStr for SessionKey {
    type Err = ParseSessionKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseSessionKeyError(s.to_string()));
        }
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ParseSessionKeyError(s.to_string()))
    }
}

impl TryFrom<String> for SessionKey {
    type Error = ParseSessionKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SessionKey> for String {
    fn from(key: SessionKey) -> Self {
        key.to_string()
    }
}
