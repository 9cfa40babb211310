//! Advisory text for hospital managers, backed by a generative-text provider.
//!
//! This module handles:
//! - The text-generation seam and the Gemini client
//! - Turning provider failures into inline messages
//! - Mock generator for testing

pub mod gemini;
pub mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{instrument, warn};

use crate::config::Config;
use crate::error::ProviderError;

pub use gemini::GeminiClient;
pub use mock::MockTextGenerator;

/// Message returned when no generative credential is configured.
pub const MISSING_KEY_MESSAGE: &str = "Error: Gemini API key is not configured on the server.";
/// Message returned when the provider produced no text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Received an empty response from the AI.";

/// A backend that turns a prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Prompt asking for staffing and supplies recommendations.
pub fn recommendation_prompt(aqi: u32, city: &str) -> String {
    format!(
        "Given a current Air Quality Index (AQI) of {aqi} in {city}, provide 2-3 brief, \
         actionable recommendations for a hospital manager. The tone should be advisory and \
         professional. Categorize them as 'Staffing:' and 'Supplies:'."
    )
}

/// Produces advisory and chat text. Failures come back as text, never as errors.
#[derive(Clone)]
pub struct AdvisoryService {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl std::fmt::Debug for AdvisoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisoryService")
            .field("configured", &self.generator.is_some())
            .finish()
    }
}

impl AdvisoryService {
    /// Create a service over an optional generator.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// Build the service from config, wiring Gemini when a key is present.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let generator =
            GeminiClient::from_config(config)?.map(|c| Arc::new(c) as Arc<dyn TextGenerator>);
        Ok(Self::new(generator))
    }

    /// Whether a generator is configured.
    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Recommendations for a hospital manager given the current AQI.
    #[instrument(skip(self))]
    pub async fn recommendations(&self, aqi: u32, city: &str) -> String {
        let Some(generator) = &self.generator else {
            return MISSING_KEY_MESSAGE.to_string();
        };

        match generator.generate(&recommendation_prompt(aqi, city)).await {
            Ok(text) => text,
            Err(ProviderError::EmptyResponse) => EMPTY_RESPONSE_MESSAGE.to_string(),
            Err(e) => {
                warn!(city = %city, error = %e, "Recommendation generation failed");
                format!("Error generating recommendations: {e}")
            }
        }
    }

    /// Single-turn chat reply.
    #[instrument(skip(self, message))]
    pub async fn chat(&self, message: &str) -> String {
        let Some(generator) = &self.generator else {
            return MISSING_KEY_MESSAGE.to_string();
        };

        match generator.generate(message).await {
            Ok(text) => text,
            Err(ProviderError::EmptyResponse) => EMPTY_RESPONSE_MESSAGE.to_string(),
            Err(e) => {
                warn!(error = %e, "Error communicating with Gemini API");
                format!("Error: Could not get a response from the AI. {e}")
            }
        }
    }
}
