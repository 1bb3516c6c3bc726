use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};
use tracing::{debug, warn};

use dsd_ai::{CompletionClient, CompletionError, CompletionRequest};

use crate::config::{AiConfig, ConfigError};

/// [`CompletionClient`] backed by the Gemini `generateContent` REST endpoint.
#[derive(Debug, Clone)]
pub struct GeminiCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiCompletionClient {
    /// Build a client for `api_key`; `cfg.timeout` bounds each HTTP request.
    pub fn new(cfg: &AiConfig, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: api_key.into(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[async_trait]
impl CompletionClient for GeminiCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<JsonValue, CompletionError> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.schema.to_json_schema(),
            },
        });

        debug!(model = %self.model, "sending generateContent request");

        let resp = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = resp.status();
        let text = resp.text().await.map_err(map_transport_error)?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(%status, "completion service rejected credentials");
            return Err(CompletionError::AuthMissing);
        }
        if !status.is_success() {
            return Err(CompletionError::Network(format!("HTTP {status}: {text}")));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| CompletionError::MalformedResponse(format!("response body: {e}")))?;

        extract_json(parsed)
    }
}

fn map_transport_error(e: reqwest::Error) -> CompletionError {
    if e.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Network(e.to_string())
    }
}

/// Join the first candidate's text parts and parse them as the JSON answer.
fn extract_json(resp: GenerateContentResponse) -> Result<JsonValue, CompletionError> {
    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(CompletionError::MalformedResponse("no text returned".to_string()));
    }

    serde_json::from_str(&text)
        .map_err(|e| CompletionError::MalformedResponse(format!("model text is not JSON: {e}")))
}

/// Stand-in used when no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredCompletionClient;

#[async_trait]
impl CompletionClient for UnconfiguredCompletionClient {
    async fn complete(&self, _request: &CompletionRequest) -> Result<JsonValue, CompletionError> {
        Err(CompletionError::AuthMissing)
    }
}

/// Pick the client for `cfg`: Gemini when a key is present, otherwise one
/// that reports `AuthMissing` on every call.
pub fn completion_client_from_config(cfg: &AiConfig) -> Result<Arc<dyn CompletionClient>, ConfigError> {
    match &cfg.api_key {
        Some(key) => Ok(Arc::new(GeminiCompletionClient::new(cfg, key.clone())?)),
        None => {
            warn!("no completion API key configured; AI advice will use fallbacks");
            Ok(Arc::new(UnconfiguredCompletionClient))
        }
    }
}
