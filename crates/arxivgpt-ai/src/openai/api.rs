//! Registry and document store implementations for OpenAiClient.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::{AssistantError, AssistantRegistry, AssistantSpec, DocumentStore, Run, Turn};

use super::client::{MessagePage, OpenAiClient, MESSAGE_PAGE_LIMIT};

#[async_trait]
impl DocumentStore for OpenAiClient {
    async fn upload(&self, path: &Path) -> Result<String, AssistantError> {
        let data = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.json".to_string());

        debug!(file = %filename, size = data.len(), "OpenAI file upload");

        let form = reqwest::multipart::Form::new()
            .text("purpose", "assistants")
            .part(
                "file",
                reqwest::multipart::Part::bytes(data).file_name(filename),
            );

        let response = self
            .http
            .post(self.url("files"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AssistantError::NetworkError(e.to_string()))?;

        let json = Self::read_json(response).await?;
        Self::parse_id(&json)
    }
}

#[async_trait]
impl AssistantRegistry for OpenAiClient {
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<String, AssistantError> {
        debug!(name = %spec.name, model = %spec.model, "OpenAI create assistant");

        let response = self
            .http
            .post(self.url("assistants"))
            .json(&Self::build_assistant_body(spec))
            .send()
            .await
            .map_err(|e| AssistantError::NetworkError(e.to_string()))?;

        let json = Self::read_json(response).await?;
        Self::parse_id(&json)
    }

    async fn attach_file(&self, assistant_id: &str, file_id: &str) -> Result<(), AssistantError> {
        debug!(assistant_id, file_id, "OpenAI attach file");

        let response = self
            .http
            .post(self.url(&format!("assistants/{assistant_id}/files")))
            .json(&serde_json::json!({ "file_id": file_id }))
            .send()
            .await
            .map_err(|e| AssistantError::NetworkError(e.to_string()))?;

        Self::read_json(response).await.map(|_| ())
    }

    async fn create_thread(&self) -> Result<String, AssistantError> {
        let response = self
            .http
            .post(self.url("threads"))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| AssistantError::NetworkError(e.to_string()))?;

        let json = Self::read_json(response).await?;
        Self::parse_id(&json)
    }

    async fn send_message(
        &self,
        thread_id: &str,
        content: &str,
        file_ids: &[String],
    ) -> Result<String, AssistantError> {
        debug!(thread_id, files = file_ids.len(), "OpenAI post message");

        let response = self
            .http
            .post(self.url(&format!("threads/{thread_id}/messages")))
            .json(&Self::build_message_body(content, file_ids))
            .send()
            .await
            .map_err(|e| AssistantError::NetworkError(e.to_string()))?;

        let json = Self::read_json(response).await?;
        Self::parse_id(&json)
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run, AssistantError> {
        let response = self
            .http
            .post(self.url(&format!("threads/{thread_id}/runs")))
            .json(&serde_json::json!({ "assistant_id": assistant_id }))
            .send()
            .await
            .map_err(|e| AssistantError::NetworkError(e.to_string()))?;

        let json = Self::read_json(response).await?;
        serde_json::from_value(json).map_err(|e| AssistantError::ParseError(e.to_string()))
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AssistantError> {
        let response = self
            .http
            .get(self.url(&format!("threads/{thread_id}/runs/{run_id}")))
            .send()
            .await
            .map_err(|e| AssistantError::NetworkError(e.to_string()))?;

        let json = Self::read_json(response).await?;
        serde_json::from_value(json).map_err(|e| AssistantError::ParseError(e.to_string()))
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Turn>, AssistantError> {
        let url = self.url(&format!("threads/{thread_id}/messages"));
        let limit = MESSAGE_PAGE_LIMIT.to_string();
        let mut turns = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(&url)
                .query(&[("limit", limit.as_str()), ("order", "desc")]);
            if let Some(ref cursor) = after {
                request = request.query(&[("after", cursor.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| AssistantError::NetworkError(e.to_string()))?;
            let json = Self::read_json(response).await?;
            let page: MessagePage = serde_json::from_value(json)
                .map_err(|e| AssistantError::ParseError(e.to_string()))?;

            turns.extend(page.data.into_iter().map(Turn::from));

            match page.last_id {
                Some(last) if page.has_more => after = Some(last),
                _ => break,
            }
        }

        debug!(thread_id, count = turns.len(), "OpenAI listed messages");
        Ok(turns)
    }
}
