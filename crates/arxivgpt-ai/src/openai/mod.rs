//! OpenAI Assistants API client (v1 beta).
//!
//! Implements [`crate::AssistantRegistry`] and [`crate::DocumentStore`]
//! over `https://api.openai.com/v1`, authenticating with the key from
//! `OPENAI_API_KEY`.

mod api;
mod client;
mod config;


pub use client::OpenAiClient;
pub use config::OpenAiConfig;
