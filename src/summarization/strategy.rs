//! Tier selection: language-model summary when configured, heuristic fallback otherwise.

use crate::processing::SummaryResult;

use super::{
    OpenAiClient, SummarizationClient, SummarizationClientError, build_heuristic_summary,
    original_extract, parse_model_reply,
};

/// Settings the summarizer is constructed from.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Language-model credential. `None` selects the heuristic tier only.
    pub api_key: Option<String>,
    /// Base URL of the chat completions API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
}

/// Which tier produced a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStrategy {
    /// Parsed from a language-model reply.
    Model,
    /// Built by the extractive fallback.
    Heuristic,
}

impl SummaryStrategy {
    /// Short lowercase label used in logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Heuristic => "heuristic",
        }
    }
}

/// Summary plus the tier that produced it.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    /// Result returned to the client.
    pub result: SummaryResult,
    /// Tier that produced `result`.
    pub strategy: SummaryStrategy,
}

/// Two-tier summarizer: language model first, heuristic fallback always available.
pub struct Summarizer {
    client: Option<Box<dyn SummarizationClient>>,
}

impl Summarizer {
    /// Build a summarizer from configuration. The model tier is enabled only with a credential.
    pub fn new(config: SummarizerConfig) -> Result<Self, SummarizationClientError> {
        let client = match config.api_key {
            Some(api_key) => Some(Box::new(OpenAiClient::new(
                config.base_url,
                api_key,
                config.model,
            )?) as Box<dyn SummarizationClient>),
            None => None,
        };
        Ok(Self { client })
    }

    /// Summarizer that only ever uses the heuristic tier.
    pub fn heuristic_only() -> Self {
        Self { client: None }
    }

    /// Summarizer backed by an arbitrary client.
    pub fn with_client(client: Box<dyn SummarizationClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Whether a language-model client is configured.
    pub fn model_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Summarize `text`. Never fails: model errors are logged and replaced by the fallback.
    pub async fn summarize(&self, text: &str) -> SummaryOutcome {
        match &self.client {
            Some(client) => match summarize_with_model(client.as_ref(), text).await {
                Ok(result) => {
                    return SummaryOutcome {
                        result,
                        strategy: SummaryStrategy::Model,
                    };
                }
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        "Model summarization failed; falling back to heuristic"
                    );
                }
            },
            None => tracing::debug!("No language-model credential; using heuristic summary"),
        }

        SummaryOutcome {
            result: build_heuristic_summary(text),
            strategy: SummaryStrategy::Heuristic,
        }
    }
}

async fn summarize_with_model(
    client: &dyn SummarizationClient,
    text: &str,
) -> Result<SummaryResult, SummarizationClientError> {
    let reply = client.complete(build_prompt(text)).await?;
    let parsed = parse_model_reply(&reply);
    Ok(SummaryResult {
        summary: parsed.summary,
        key_points: parsed.key_points,
        original_extract: original_extract(text),
    })
}

/// Prompt sent to the language model for `text`.
pub fn build_prompt(text: &str) -> String {
    format!(
        "Summarize the following legal text in plain English. Provide a short summary (2-3 sentences) and 4 bullet key points:\n\n{text}"
    )
}
