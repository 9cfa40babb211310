//! Live air-quality readings.
//!
//! This module handles:
//! - Reading and outcome types
//! - Extracting an AQI from free-text search answers
//! - The Serper search provider
//! - The facade that always yields a usable reading
//! - Mock provider for testing

pub mod facade;
pub mod mock;
pub mod parse;
pub mod provider;
pub mod reading;

pub use facade::{fallback_value, LiveMetricFacade, FALLBACK_MAX, FALLBACK_MIN};
pub use mock::{MockSearchConfig, MockSearchProvider};
pub use parse::first_whole_number;
pub use provider::{SearchProvider, SerperClient};
pub use reading::{AqiReading, FallbackReason, ReadingSource, ResolveOutcome};
