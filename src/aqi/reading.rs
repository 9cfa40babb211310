//! Reading and resolution outcome types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use crate::error::ProviderError;

/// Where a reading came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReadingSource {
    /// Parsed from the search provider's answer.
    Live,
    /// Synthetic value substituted because live data was unavailable.
    Fallback,
}

/// Why a resolution fell back to a synthetic value.
#[derive(Debug)]
pub enum FallbackReason {
    /// No search credential is configured.
    Unconfigured,
    /// Provider call failed (network, status, body).
    Provider(ProviderError),
    /// Provider call did not finish within the request timeout.
    Timeout,
    /// Response had no answer text.
    MissingAnswer,
    /// Answer text had no whole-number token.
    NoNumericToken,
}

impl FallbackReason {
    /// Short label used for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            FallbackReason::Unconfigured => "unconfigured",
            FallbackReason::Provider(_) => "provider_error",
            FallbackReason::Timeout => "timeout",
            FallbackReason::MissingAnswer => "missing_answer",
            FallbackReason::NoNumericToken => "no_numeric_token",
        }
    }
}

/// Tagged result of resolving a location.
#[derive(Debug)]
pub enum ResolveOutcome {
    /// Value parsed from the provider.
    Live(u32),
    /// Synthetic value and the reason it was used.
    Fallback {
        /// Substituted value.
        value: u32,
        /// Why live data was not used.
        reason: FallbackReason,
    },
}

impl ResolveOutcome {
    /// The AQI value regardless of origin.
    pub fn value(&self) -> u32 {
        match self {
            ResolveOutcome::Live(value) => *value,
            ResolveOutcome::Fallback { value, .. } => *value,
        }
    }

    /// Origin of the value.
    pub fn source(&self) -> ReadingSource {
        match self {
            ResolveOutcome::Live(_) => ReadingSource::Live,
            ResolveOutcome::Fallback { .. } => ReadingSource::Fallback,
        }
    }

    /// Collapse into a reading for `location`.
    pub fn into_reading(self, location: &str) -> AqiReading {
        AqiReading {
            value: self.value(),
            source: self.source(),
            location: location.to_string(),
            observed_at: OffsetDateTime::now_utc(),
        }
    }
}

/// AQI reading handed back to callers. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqiReading {
    /// AQI value, advisory range 0-500.
    pub value: u32,
    /// Live or fallback.
    pub source: ReadingSource,
    /// Location the reading was resolved for.
    pub location: String,
    /// When the reading was produced.
    #[serde(with = "time::serde::rfc3339")]
    pub observed_at: OffsetDateTime,
}
