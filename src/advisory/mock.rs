//! Mock text generator for unit testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::TextGenerator;
use crate::error::ProviderError;

/// Mock text generator.
#[derive(Debug, Clone, Default)]
pub struct MockTextGenerator {
    /// Reply to return; `None` fails every request.
    reply: Option<String>,
    /// Prompts received, in order.
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockTextGenerator {
    /// Generator that always replies with `text`. An empty reply is reported
    /// as [`ProviderError::EmptyResponse`], as the real client does.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            prompts: Arc::default(),
        }
    }

    /// Generator that fails every request.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            Some(text) if text.is_empty() => Err(ProviderError::EmptyResponse),
            Some(text) => Ok(text.clone()),
            None => Err(ProviderError::Status {
                status: 503,
                body: "Mock generation failure".to_string(),
            }),
        }
    }
}
