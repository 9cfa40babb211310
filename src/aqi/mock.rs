//! Mock search provider for unit testing.
//!
//! Lets tests drive every provider outcome without making real network
//! requests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::provider::SearchProvider;
use crate::error::ProviderError;

/// Configuration for mock provider behavior.
#[derive(Debug, Clone, Default)]
pub struct MockSearchConfig {
    /// Answer-box text to return. `None` means the response had no answer box.
    pub answer: Option<String>,
    /// Whether to fail every request.
    pub fail: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// Mock search provider.
#[derive(Debug, Clone, Default)]
pub struct MockSearchProvider {
    /// Mock configuration.
    config: MockSearchConfig,
    /// Queries received, in order.
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockSearchProvider {
    /// Create a provider that answers without an answer box.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with custom configuration.
    pub fn with_config(config: MockSearchConfig) -> Self {
        Self {
            config,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a provider that always answers with `text`.
    pub fn answering(text: impl Into<String>) -> Self {
        Self::with_config(MockSearchConfig {
            answer: Some(text.into()),
            ..Default::default()
        })
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn answer(&self, query: &str) -> Result<Option<String>, ProviderError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }

        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.config.fail {
            return Err(ProviderError::Status {
                status: 500,
                body: "Mock search failure".to_string(),
            });
        }

        Ok(self.config.answer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_records_queries() {
        let mock = MockSearchProvider::answering("AQI 55");
        let answer = mock.answer("live aqi in Pune").await.unwrap();
        assert_eq!(answer.as_deref(), Some("AQI 55"));
        assert_eq!(mock.queries(), vec!["live aqi in Pune".to_string()]);
    }

    #[tokio::test]
    async fn mock_failure_mode() {
        let mock = MockSearchProvider::with_config(MockSearchConfig {
            fail: true,
            ..Default::default()
        });
        assert!(mock.answer("anything").await.is_err());
    }
}
