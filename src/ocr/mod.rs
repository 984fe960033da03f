//! OCR engine seam and the tesseract-backed implementation.
//!
//! Every recognition acquires a fresh [`OcrSession`]: a scratch directory that holds the image
//! handed to the `tesseract` binary. The session is released by `Drop`, so nothing survives the
//! call regardless of how recognition ends.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

use tempfile::TempDir;
use thiserror::Error;

const INPUT_FILE_NAME: &str = "upload.img";

/// Errors raised while running OCR.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The OCR binary could not be located.
    #[error("OCR backend not available: {0}")]
    BackendNotAvailable(String),
    /// The engine ran but reported a failure (corrupt image, missing language pack, ...).
    #[error("OCR failed: {0}")]
    OcrFailed(String),
    /// Scratch space could not be prepared.
    #[error("OCR I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The blocking worker running the engine did not complete.
    #[error("OCR worker failed: {0}")]
    Worker(String),
}

/// Interface implemented by OCR backends.
///
/// Implementations are blocking; async callers should run them on a blocking thread.
pub trait OcrEngine: Send + Sync {
    /// Recognize the text contained in an encoded image.
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;
}

/// OCR backend that shells out to the `tesseract` command-line tool.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: String,
    language: String,
}

impl TesseractEngine {
    /// Build an engine invoking `binary` with the given language pack.
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }

    /// Language pack passed via `-l`.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Acquire a single-use session. Dropping the session releases its scratch space.
    pub fn acquire(&self) -> Result<OcrSession<'_>, OcrError> {
        let scratch = tempfile::Builder::new().prefix("docsum-ocr-").tempdir()?;
        tracing::debug!(path = %scratch.path().display(), "Acquired OCR session");
        Ok(OcrSession {
            engine: self,
            scratch,
        })
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let session = self.acquire()?;
        session.recognize(image)
    }
}

/// One acquisition of the OCR engine, valid for a single recognition.
pub struct OcrSession<'a> {
    engine: &'a TesseractEngine,
    scratch: TempDir,
}

impl OcrSession<'_> {
    /// Scratch directory owned by this session.
    pub fn path(&self) -> &Path {
        self.scratch.path()
    }

    /// Run the engine over `image`, consuming the session.
    pub fn recognize(self, image: &[u8]) -> Result<String, OcrError> {
        let input = self.scratch.path().join(INPUT_FILE_NAME);
        std::fs::write(&input, image)?;

        let start = Instant::now();
        let output = Command::new(&self.engine.binary)
            .arg(&input)
            .arg("stdout")
            .args(["-l", &self.engine.language])
            .output();

        let output = match output {
            Ok(output) => output,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(OcrError::BackendNotAvailable(format!(
                    "{} not found (install tesseract-ocr)",
                    self.engine.binary
                )));
            }
            Err(err) => return Err(OcrError::Io(err)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::OcrFailed(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            chars = text.chars().count(),
            "OCR recognition finished"
        );
        Ok(text)
    }
}

impl Drop for OcrSession<'_> {
    fn drop(&mut self) {
        tracing::debug!(path = %self.scratch.path().display(), "Releasing OCR session");
    }
}
