//! Configuration loading and representation.
//!
//! Everything comes from environment variables, read once at startup.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Settings for the hosted completion service.
#[derive(Clone, PartialEq, Eq)]
pub struct AiConfig {
    /// `None` means "run without the model": every advisory call falls back.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

// Hand-written so the key never lands in logs.
impl core::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub ai: AiConfig,
}

impl AppConfig {
    /// Read `GEMINI_API_KEY` (or `API_KEY`), `GEMINI_MODEL`, `GEMINI_ENDPOINT`,
    /// `AI_TIMEOUT_MS` and `BIND_ADDR` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank("GEMINI_API_KEY").or_else(|| non_blank("API_KEY"));
        let model = non_blank("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let endpoint = non_blank("GEMINI_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_ms = match non_blank("AI_TIMEOUT_MS") {
            None => DEFAULT_TIMEOUT_MS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::InvalidValue {
                        key: "AI_TIMEOUT_MS",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Ok(ms) => ms,
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        key: "AI_TIMEOUT_MS",
                        reason: format!("{raw:?}: {e}"),
                    });
                }
            },
        };

        let bind_addr = non_blank("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            bind_addr,
            ai: AiConfig {
                api_key,
                model,
                endpoint,
                timeout: Duration::from_millis(timeout_ms),
            },
        })
    }
}
