//! Plain-language summarization backed by a hosted language model.
//!
//! The model is optional. Without a credential, or whenever the completion call fails, the
//! [`Summarizer`] falls back to a deterministic extractive summary so callers always receive a
//! result. The OpenAI-compatible client issues chat-completion requests directly over HTTP.

mod extractive;
mod strategy;

pub use extractive::{ParsedReply, build_heuristic_summary, original_extract, parse_model_reply};
pub use strategy::{SummaryOutcome, SummaryStrategy, Summarizer, SummarizerConfig, build_prompt};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const MAX_COMPLETION_TOKENS: u32 = 500;
const COMPLETION_TEMPERATURE: f64 = 0.2;

/// Errors surfaced while attempting model-backed summarization.
#[derive(Debug, Error)]
pub enum SummarizationClientError {
    /// Provider could not be reached or the client could not be built.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned a non-success response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Interface implemented by language-model providers.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Send a single-turn prompt and return the raw reply text.
    async fn complete(&self, prompt: String) -> Result<String, SummarizationClientError>;
}

/// Client for OpenAI-compatible `/v1/chat/completions` endpoints.
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Build a client targeting `base_url` with the given credential and model.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, SummarizationClientError> {
        let http = Client::builder()
            .user_agent(concat!("docsum/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to construct HTTP client: {error}"
                ))
            })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl SummarizationClient for OpenAiClient {
    async fn complete(&self, prompt: String) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": MAX_COMPLETION_TOKENS,
            "temperature": COMPLETION_TEMPERATURE,
        });

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to reach {}: {error}",
                    self.base_url
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "provider returned {status}: {body}"
            )));
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode chat completion: {error}"
            ))
        })?;

        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default())
    }
}
