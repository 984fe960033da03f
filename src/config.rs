use crate::summarization::SummarizerConfig;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OCR_LANGUAGE: &str = "eng";
const DEFAULT_TESSERACT_BIN: &str = "tesseract";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the summarizer server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the hosted language model. Absent means heuristic summaries only.
    pub openai_api_key: Option<String>,
    /// Base URL of the OpenAI-compatible chat completions API.
    pub openai_base_url: String,
    /// Model identifier sent with each completion request.
    pub openai_model: String,
    /// Tesseract language pack used for OCR.
    pub ocr_language: String,
    /// Path or name of the tesseract binary.
    pub tesseract_bin: String,
    /// Upper bound on the multipart request body.
    pub max_upload_bytes: usize,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Optional log file path; a default under `logs/` is used when absent.
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let load = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            openai_api_key: load("OPENAI_API_KEY"),
            openai_base_url: load("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: load("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            ocr_language: load("OCR_LANGUAGE").unwrap_or_else(|| DEFAULT_OCR_LANGUAGE.to_string()),
            tesseract_bin: load("TESSERACT_BIN")
                .unwrap_or_else(|| DEFAULT_TESSERACT_BIN.to_string()),
            max_upload_bytes: parse_optional(load("MAX_UPLOAD_BYTES"), "MAX_UPLOAD_BYTES")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            server_port: parse_optional(load("SERVER_PORT"), "SERVER_PORT")?,
            log_file: load("DOCSUM_LOG_FILE").map(PathBuf::from),
        })
    }

    /// Settings handed to the summarizer at construction time.
    pub fn summarizer_config(&self) -> SummarizerConfig {
        SummarizerConfig {
            api_key: self.openai_api_key.clone(),
            base_url: self.openai_base_url.clone(),
            model: self.openai_model.clone(),
        }
    }

    /// Emit a debug line describing the loaded settings. Call once tracing is installed.
    pub fn log_summary(&self) {
        tracing::debug!(
            model = %self.openai_model,
            base_url = %self.openai_base_url,
            llm_enabled = self.openai_api_key.is_some(),
            ocr_language = %self.ocr_language,
            server_port = ?self.server_port,
            "Loaded configuration"
        );
    }
}

fn parse_optional<T: std::str::FromStr>(
    value: Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

/// Global configuration cache populated during process start.
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load `.env` plus the process environment and install the result in the global cache.
///
/// Runs before tracing is installed, so it does not log.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    Ok(CONFIG.get_or_init(|| config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]).expect("config");
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.openai_base_url, "https://api.openai.com");
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.ocr_language, "eng");
        assert_eq!(config.tesseract_bin, "tesseract");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.server_port.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = config_from(&[("OPENAI_API_KEY", "   ")]).expect("config");
        assert!(config.summarizer_config().api_key.is_none());
    }

    #[test]
    fn explicit_values_are_respected() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4.1-mini"),
            ("SERVER_PORT", "8080"),
            ("MAX_UPLOAD_BYTES", "1024"),
        ])
        .expect("config");
        assert_eq!(config.server_port, Some(8080));
        assert_eq!(config.max_upload_bytes, 1024);
        let summarizer = config.summarizer_config();
        assert_eq!(summarizer.api_key.as_deref(), Some("sk-test"));
        assert_eq!(summarizer.model, "gpt-4.1-mini");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let error = config_from(&[("SERVER_PORT", "not-a-port")]).expect_err("invalid port");
        assert!(matches!(error, ConfigError::InvalidValue(key) if key == "SERVER_PORT"));
    }

    #[test]
    fn summary_is_logged_without_the_credential() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let config = config_from(&[("OPENAI_API_KEY", "sk-secret"), ("SERVER_PORT", "8080")])
            .expect("config");
        tracing::subscriber::with_default(subscriber, || config.log_summary());

        let output = String::from_utf8(logs.0.lock().expect("log buffer").clone()).expect("utf8");
        assert!(output.contains("Loaded configuration"));
        assert!(output.contains("llm_enabled=true"));
        assert!(output.contains("server_port=Some(8080)"));
        assert!(!output.contains("sk-secret"));
    }
}
