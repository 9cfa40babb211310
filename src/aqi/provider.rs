//! Serper search provider.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::ProviderError;
use crate::metrics;

/// A web search backend able to answer a natural-language query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run `query` and return the answer-box text, if the provider gave one.
    async fn answer(&self, query: &str) -> Result<Option<String>, ProviderError>;
}

/// Serper (google.serper.dev) client.
#[derive(Debug, Clone)]
pub struct SerperClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Search endpoint.
    url: String,
    /// API key sent as `X-API-KEY`.
    api_key: String,
}

/// Search request body.
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    /// Natural-language query.
    q: &'a str,
}

/// Search response. Only the answer box is of interest.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Featured answer, when Serper has one.
    #[serde(rename = "answerBox")]
    pub answer_box: Option<AnswerBox>,
}

/// Featured answer block.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerBox {
    /// Free-text answer.
    pub answer: Option<String>,
}

impl SerperClient {
    /// Create a client with a bounded request timeout.
    pub fn new(
        api_key: impl Into<String>,
        url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .build()?;

        Ok(Self {
            http,
            url: url.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a client from config. Returns `None` when no key is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, reqwest::Error> {
        match &config.serper_api_key {
            Some(key) => {
                Self::new(key.clone(), config.serper_url.clone(), config.http_timeout()).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Get the search endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SearchProvider for SerperClient {
    #[instrument(skip(self))]
    async fn answer(&self, query: &str) -> Result<Option<String>, ProviderError> {
        let start = Instant::now();

        let response = self
            .http
            .post(&self.url)
            .header("X-API-KEY", &self.api_key)
            .json(&SearchRequest { q: query })
            .send()
            .await;
        metrics::record_provider_latency(start, "serper");
        let response = response?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::status(status, &body));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        debug!(has_answer_box = parsed.answer_box.is_some(), "Search response received");

        Ok(parsed.answer_box.and_then(|b| b.answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_is_absent_without_key() {
        let config = Config::default();
        assert!(SerperClient::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn client_uses_configured_url() {
        let config = Config {
            serper_api_key: Some("key".to_string()),
            serper_url: "http://localhost:9/search".to_string(),
            ..Config::default()
        };
        let client = SerperClient::from_config(&config).unwrap().unwrap();
        assert_eq!(client.url(), "http://localhost:9/search");
    }

    #[test]
    fn response_without_answer_box_parses() {
        let parsed: SearchResponse =
            serde_json::from_str(r#"{"organic": [], "searchParameters": {"q": "x"}}"#).unwrap();
        assert!(parsed.answer_box.is_none());

        let parsed: SearchResponse =
            serde_json::from_str(r#"{"answerBox": {"answer": "AQI 97 Moderate"}}"#).unwrap();
        assert_eq!(parsed.answer_box.unwrap().answer.as_deref(), Some("AQI 97 Moderate"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_http_error() {
        // Port 9 (discard) is not listening on loopback.
        let client =
            SerperClient::new("key", "http://127.0.0.1:9/search", Duration::from_millis(500))
                .unwrap();
        let err = client.answer("live aqi in Mumbai").await.unwrap_err();
        assert!(matches!(err, ProviderError::Http(_)));
    }
}
