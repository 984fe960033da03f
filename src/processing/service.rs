//! Processing service sequencing detection, extraction, and summarization.

use crate::{
    config::Config,
    metrics::{MetricsSnapshot, PipelineMetrics},
    ocr::{OcrEngine, TesseractEngine},
    processing::{
        detect::{DetectedFormat, detect},
        extract::extract_text,
        types::{ProcessingError, SummaryResult, UploadedDocument},
    },
    summarization::{SummarizationClientError, Summarizer},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Notice returned for uploads the pipeline cannot read.
pub const UNSUPPORTED_NOTICE: &str = "Automatic OCR for this file type is not supported. Please upload an image (.png/.jpg) or a .txt file.";

/// Runs one upload through format detection, text extraction, and summarization.
///
/// The service holds only immutable collaborators and atomic counters, so a single instance is
/// shared across concurrent requests through an `Arc`.
pub struct ProcessingService {
    ocr: Arc<dyn OcrEngine>,
    summarizer: Summarizer,
    metrics: Arc<PipelineMetrics>,
}

/// Abstraction over the pipeline used by the HTTP surface.
#[async_trait]
pub trait ProcessingApi: Send + Sync {
    /// Turn an uploaded document into a summary.
    async fn process_document(
        &self,
        upload: UploadedDocument,
    ) -> Result<SummaryResult, ProcessingError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl ProcessingService {
    /// Assemble a service from explicit collaborators.
    pub fn new(ocr: Arc<dyn OcrEngine>, summarizer: Summarizer) -> Self {
        Self {
            ocr,
            summarizer,
            metrics: Arc::new(PipelineMetrics::new()),
        }
    }

    /// Build the production service: tesseract OCR plus the configured summarizer.
    pub fn from_config(config: &Config) -> Result<Self, SummarizationClientError> {
        let engine = TesseractEngine::new(config.tesseract_bin.clone(), config.ocr_language.clone());
        tracing::info!(
            language = engine.language(),
            "OCR engine configured"
        );
        let summarizer = Summarizer::new(config.summarizer_config())?;
        if summarizer.model_enabled() {
            tracing::info!(model = %config.openai_model, "Language-model summaries enabled");
        } else {
            tracing::info!("OPENAI_API_KEY not set; using heuristic summaries only");
        }
        Ok(Self::new(Arc::new(engine), summarizer))
    }

    /// Process an upload end to end.
    pub async fn process_document(
        &self,
        upload: UploadedDocument,
    ) -> Result<SummaryResult, ProcessingError> {
        let span = tracing::info_span!(
            "process_document",
            request_id = %Uuid::new_v4(),
            filename = upload.filename.as_deref().unwrap_or(""),
            bytes = upload.bytes.len(),
        );
        self.run_pipeline(upload).instrument(span).await
    }

    async fn run_pipeline(
        &self,
        upload: UploadedDocument,
    ) -> Result<SummaryResult, ProcessingError> {
        let UploadedDocument {
            bytes,
            filename,
            content_type,
        } = upload;

        let format = detect(&bytes, filename.as_deref());
        tracing::info!(
            format = format.label(),
            declared_type = content_type.as_deref().unwrap_or(""),
            "Detected upload format"
        );

        if format == DetectedFormat::Unsupported {
            self.metrics.record_unsupported();
            return Ok(SummaryResult {
                summary: UNSUPPORTED_NOTICE.to_string(),
                key_points: Vec::new(),
                original_extract: String::new(),
            });
        }

        let text = match extract_text(bytes, format, Arc::clone(&self.ocr)).await {
            Ok(text) => text,
            Err(error) => {
                self.metrics.record_failure();
                tracing::error!(error = %error, "Text extraction failed");
                return Err(error.into());
            }
        };
        tracing::debug!(chars = text.chars().count(), "Extracted text");

        let outcome = self.summarizer.summarize(&text).await;
        self.metrics.record_summary(outcome.strategy);
        tracing::info!(
            strategy = outcome.strategy.label(),
            key_points = outcome.result.key_points.len(),
            "Document summarized"
        );

        Ok(outcome.result)
    }

    /// Return the current pipeline metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[async_trait]
impl ProcessingApi for ProcessingService {
    async fn process_document(
        &self,
        upload: UploadedDocument,
    ) -> Result<SummaryResult, ProcessingError> {
        ProcessingService::process_document(self, upload).await
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        ProcessingService::metrics_snapshot(self)
    }
}
