//! Gemini `generateContent` client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::TextGenerator;
use crate::config::Config;
use crate::error::ProviderError;
use crate::metrics;

/// Gemini REST client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// REST base URL (without trailing slash).
    base_url: String,
    /// Model name, e.g. `gemini-1.5-flash`.
    model: String,
    /// API key sent as `x-goog-api-key`.
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// `generateContent` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Candidate completions.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One candidate completion.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Generated content.
    pub content: Option<Content>,
}

/// Content made of parts.
#[derive(Debug, Clone, Deserialize)]
pub struct Content {
    /// Content parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A content part.
#[derive(Debug, Clone, Deserialize)]
pub struct Part {
    /// Text, when the part is textual.
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiClient {
    /// Create a client with a bounded request timeout.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a client from config. Returns `None` when no key is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, reqwest::Error> {
        match &config.gemini_api_key {
            Some(key) => Self::new(
                key.clone(),
                config.gemini_url.clone(),
                config.gemini_model.clone(),
                config.http_timeout(),
            )
            .map(Some),
            None => Ok(None),
        }
    }

    /// Full `generateContent` endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let start = Instant::now();
        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await;
        metrics::record_provider_latency(start, "gemini");
        let response = response?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::status(status, &body));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        debug!(candidates = parsed.candidates.len(), "Gemini response received");

        parsed.text().ok_or(ProviderError::EmptyResponse)
    }
}
