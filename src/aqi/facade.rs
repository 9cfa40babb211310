//! Best-effort AQI resolution with a synthetic fallback.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{info, instrument, warn};

use super::parse::first_whole_number;
use super::provider::{SearchProvider, SerperClient};
use super::reading::{AqiReading, FallbackReason, ResolveOutcome};
use crate::config::Config;
use crate::metrics;

/// Lowest fallback value (inclusive).
pub const FALLBACK_MIN: u32 = 50;
/// Highest fallback value (inclusive).
pub const FALLBACK_MAX: u32 = 250;

/// Uniform synthetic AQI in `[FALLBACK_MIN, FALLBACK_MAX]`.
pub fn fallback_value() -> u32 {
    rand::rng().random_range(FALLBACK_MIN..=FALLBACK_MAX)
}

/// Resolves an AQI for a location, live when possible, synthetic otherwise.
///
/// Holds no mutable state; share it behind an `Arc` across handlers and
/// streams.
#[derive(Clone)]
pub struct LiveMetricFacade {
    /// Search backend, absent when no credential is configured.
    provider: Option<Arc<dyn SearchProvider>>,
    /// Upper bound on a single provider call.
    request_timeout: Duration,
}

impl std::fmt::Debug for LiveMetricFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveMetricFacade")
            .field("live", &self.is_live())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl LiveMetricFacade {
    /// Create a facade over an optional provider.
    pub fn new(provider: Option<Arc<dyn SearchProvider>>, request_timeout: Duration) -> Self {
        Self {
            provider,
            request_timeout,
        }
    }

    /// Create a facade that only ever produces fallback readings.
    pub fn offline() -> Self {
        Self::new(None, Config::default().http_timeout())
    }

    /// Build the facade from config, wiring Serper when a key is present.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let provider = SerperClient::from_config(config)?
            .map(|client| Arc::new(client) as Arc<dyn SearchProvider>);
        Ok(Self::new(provider, config.http_timeout()))
    }

    /// Whether a provider is configured.
    pub fn is_live(&self) -> bool {
        self.provider.is_some()
    }

    /// Resolve a location to a tagged outcome. Never fails.
    #[instrument(skip(self))]
    pub async fn resolve_outcome(&self, location: &str) -> ResolveOutcome {
        let Some(provider) = &self.provider else {
            return Self::fallback(location, FallbackReason::Unconfigured);
        };

        let query = format!("live aqi in {location}");
        let lookup = tokio::time::timeout(self.request_timeout, provider.answer(&query));
        let answer = match lookup.await {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => return Self::fallback(location, FallbackReason::Provider(e)),
            Err(_) => return Self::fallback(location, FallbackReason::Timeout),
        };

        let Some(answer) = answer else {
            return Self::fallback(location, FallbackReason::MissingAnswer);
        };

        match first_whole_number(&answer) {
            Some(value) => {
                metrics::inc_readings("live");
                ResolveOutcome::Live(value)
            }
            None => Self::fallback(location, FallbackReason::NoNumericToken),
        }
    }

    /// Resolve a location to a reading. Never fails.
    pub async fn resolve(&self, location: &str) -> AqiReading {
        self.resolve_outcome(location).await.into_reading(location)
    }

    fn fallback(location: &str, reason: FallbackReason) -> ResolveOutcome {
        match &reason {
            FallbackReason::Unconfigured => {
                info!(city = %location, "Serper API key not configured, returning random AQI")
            }
            FallbackReason::Provider(e) => {
                warn!(
                    city = %location,
                    error = %e,
                    "Error fetching live AQI, falling back to random"
                )
            }
            FallbackReason::Timeout => {
                warn!(city = %location, "Live AQI lookup timed out, falling back to random")
            }
            other => {
                warn!(
                    city = %location,
                    reason = other.label(),
                    "Could not find AQI in answer, falling back to random"
                )
            }
        }

        metrics::inc_readings("fallback");
        metrics::inc_fallbacks(reason.label());

        ResolveOutcome::Fallback {
            value: fallback_value(),
            reason,
        }
    }
}
