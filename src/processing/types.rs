//! Core data types and error definitions for the document pipeline.

use crate::ocr::OcrError;
use serde::Serialize;
use thiserror::Error;

/// A file received from the upload form. Lives for a single request.
#[derive(Debug, Clone, Default)]
pub struct UploadedDocument {
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// Filename declared by the client, if any.
    pub filename: Option<String>,
    /// MIME type declared by the client. Untrusted; only logged.
    pub content_type: Option<String>,
}

/// Summary returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResult {
    /// Short plain-language summary.
    pub summary: String,
    /// Up to four key points.
    pub key_points: Vec<String>,
    /// Leading slice of the extracted text (at most 1500 characters).
    pub original_extract: String,
}

/// Errors raised while turning an upload into text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The OCR engine could not recognize the image.
    #[error(transparent)]
    Ocr(#[from] OcrError),
    /// Extraction was requested for a format the pipeline does not handle.
    #[error("no text extractor for unsupported format")]
    UnsupportedFormat,
}

/// Errors emitted by the document pipeline.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// Text extraction failed; the request cannot be summarized.
    #[error("Failed to extract text: {0}")]
    Extraction(#[from] ExtractionError),
}
