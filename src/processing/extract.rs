//! Text extraction for the formats the pipeline accepts.

use std::sync::Arc;

use crate::ocr::{OcrEngine, OcrError};

use super::detect::DetectedFormat;
use super::types::ExtractionError;

/// Recover text from an upload of a known format.
///
/// Images go through `engine` on a blocking thread. Plain text is decoded as UTF-8 with
/// malformed sequences replaced and a leading byte-order mark dropped.
pub async fn extract_text(
    bytes: Vec<u8>,
    format: DetectedFormat,
    engine: Arc<dyn OcrEngine>,
) -> Result<String, ExtractionError> {
    match format {
        DetectedFormat::Image => {
            let text = tokio::task::spawn_blocking(move || engine.recognize(&bytes))
                .await
                .map_err(|error| OcrError::Worker(error.to_string()))??;
            Ok(text)
        }
        DetectedFormat::PlainText => Ok(decode_text(&bytes)),
        DetectedFormat::Unsupported => Err(ExtractionError::UnsupportedFormat),
    }
}

fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix('\u{FEFF}') {
        Some(rest) => rest.to_string(),
        None => text.into_owned(),
    }
}
