//! Session records as stored in the session file.

use serde::{Deserialize, Deserializer, Serialize};

use arxivgpt_common::SessionKey;

/// A named assistant, its conversation thread, and the files bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "Assistant ID", deserialize_with = "null_as_default")]
    pub assistant_id: String,
    #[serde(rename = "Thread ID", deserialize_with = "null_as_default")]
    pub thread_id: String,
    #[serde(rename = "User Name Input", deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(rename = "File IDs", default, deserialize_with = "null_as_default")]
    pub file_ids: Vec<String>,
}

impl Session {
    pub fn new(
        assistant_id: impl Into<String>,
        thread_id: impl Into<String>,
        display_name: impl Into<String>,
        file_ids: Vec<String>,
    ) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            thread_id: thread_id.into(),
            display_name: display_name.into(),
            file_ids,
        }
    }

    /// Both remote identifiers are present.
    pub fn is_bound(&self) -> bool {
        !self.assistant_id.is_empty() && !self.thread_id.is_empty()
    }
}

/// One row of the session listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub key: SessionKey,
    pub display_name: String,
}

// Older store files wrote `null` for identifiers that failed to create.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_store_field_names() {
        let session = Session::new("asst_1", "thread_1", "Dec16", vec!["file-1".into()]);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Assistant ID": "asst_1",
                "Thread ID": "thread_1",
                "User Name Input": "Dec16",
                "File IDs": ["file-1"]
            })
        );
    }

    #[test]
    fn null_identifiers_load_unbound() {
        let session: Session = serde_json::from_str(
            r#"{"Assistant ID": null, "Thread ID": "thread_1",
                "User Name Input": "Old", "File IDs": null}"#,
        )
        .unwrap();
        assert_eq!(session.assistant_id, "");
        assert!(session.file_ids.is_empty());
        assert!(!session.is_bound());
    }

    #[test]
    fn missing_file_ids_default_to_empty() {
        let session: Session = serde_json::from_str(
            r#"{"Assistant ID": "a", "Thread ID": "t", "User Name Input": "n"}"#,
        )
        .unwrap();
        assert!(session.file_ids.is_empty());
        assert!(session.is_bound());
    }
}
