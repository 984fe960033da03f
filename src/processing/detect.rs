//! Upload classification by content sniffing and filename suffix.

/// Format of an upload as far as the pipeline is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedFormat {
    /// Bytes carry an image signature; text is recovered through OCR.
    Image,
    /// A `.txt` upload decoded directly.
    PlainText,
    /// Anything else.
    Unsupported,
}

impl DetectedFormat {
    /// Short lowercase label used in logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::PlainText => "text",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Classify an upload.
///
/// Images are recognized from their magic bytes only, never from the declared name or MIME
/// type. Plain text relies on a case-insensitive `.txt` suffix.
pub fn detect(bytes: &[u8], filename: Option<&str>) -> DetectedFormat {
    if let Some(kind) = infer::get(bytes) {
        if kind.mime_type().starts_with("image/") {
            return DetectedFormat::Image;
        }
    }

    let is_text = filename
        .map(|name| name.to_ascii_lowercase().ends_with(".txt"))
        .unwrap_or(false);
    if is_text {
        DetectedFormat::PlainText
    } else {
        DetectedFormat::Unsupported
    }
}
