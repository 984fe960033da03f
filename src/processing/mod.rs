//! Document pipeline: format detection, text extraction, and summarization.

pub mod detect;
pub mod extract;
mod service;
pub mod types;

pub use detect::DetectedFormat;
pub use service::{ProcessingApi, ProcessingService, UNSUPPORTED_NOTICE};
pub use types::{ExtractionError, ProcessingError, SummaryResult, UploadedDocument};
