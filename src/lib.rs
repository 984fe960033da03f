#![deny(missing_docs)]

//! Core library for the plain-language document summarizer.

/// HTTP routing and request handlers.
pub mod api;
/// Embedded static assets for the upload page.
pub mod assets;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Pipeline counters.
pub mod metrics;
/// OCR engine abstraction and the tesseract backend.
pub mod ocr;
/// Document pipeline: detection, extraction, orchestration.
pub mod processing;
/// Language-model summarization with heuristic fallback.
pub mod summarization;
