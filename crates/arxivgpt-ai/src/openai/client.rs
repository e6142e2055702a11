//! OpenAI client struct, request building, and response parsing.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;

use crate::{AssistantError, AssistantSpec, Role, Turn};

use super::config::OpenAiConfig;

pub(crate) const ASSISTANTS_BETA: &str = "assistants=v1";

/// Page size used when listing thread messages.
pub(crate) const MESSAGE_PAGE_LIMIT: u32 = 100;

/// OpenAI Assistants API client.
pub struct OpenAiClient {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, AssistantError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(config.request_timeout)
            .default_headers(Self::auth_headers(&config)?)
            .build()
            .map_err(|e| AssistantError::NetworkError(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base, path.trim_start_matches('/'))
    }

    /// Bearer auth plus the Assistants beta opt-in, sent on every request.
    fn auth_headers(config: &OpenAiConfig) -> Result<HeaderMap, AssistantError> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| {
                AssistantError::NotConfigured("API key contains invalid header characters".into())
            })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("OpenAI-Beta", HeaderValue::from_static(ASSISTANTS_BETA));
        Ok(headers)
    }

    pub(crate) fn build_assistant_body(spec: &AssistantSpec) -> serde_json::Value {
        serde_json::json!({
            "name": spec.name,
            "instructions": spec.instructions,
            "model": spec.model,
            "tools": spec.capabilities,
        })
    }

    pub(crate) fn build_message_body(content: &str, file_ids: &[String]) -> serde_json::Value {
        let mut body = serde_json::json!({
            "role": "user",
            "content": content,
        });
        if !file_ids.is_empty() {
            body["file_ids"] = serde_json::json!(file_ids);
        }
        body
    }

    /// Turn an HTTP response into JSON, mapping failure statuses to errors.
    pub(crate) async fn read_json(
        response: reqwest::Response,
    ) -> Result<serde_json::Value, AssistantError> {
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AssistantError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(AssistantError::ApiError(format!("HTTP {status}: {text}")));
        }

        response
            .json()
            .await
            .map_err(|e| AssistantError::ParseError(e.to_string()))
    }

    pub(crate) fn parse_id(json: &serde_json::Value) -> Result<String, AssistantError> {
        json["id"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| AssistantError::ParseError("no 'id' field in response".into()))
    }
}

/// One page of `GET /threads/{id}/messages`.
#[derive(Debug, Deserialize)]
pub(crate) struct MessagePage {
    pub data: Vec<MessageObject>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub last_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageObject {
    pub role: Role,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ContentBlock {
    Text { text: TextValue },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextValue {
    pub value: String,
}

impl From<MessageObject> for Turn {
    fn from(message: MessageObject) -> Self {
        let content = message
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text.value),
                ContentBlock::Other => None,
            })
            .unwrap_or_default();
        Turn {
            role: message.role,
            content,
        }
    }
}
