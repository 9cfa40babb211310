//! Prometheus metrics for AQI resolution and live streams.
//!
//! This module provides metrics for:
//! - Readings served, split by live vs fallback
//! - Fallback reasons
//! - Outbound provider latency
//! - Open pollution streams

use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Readings served counter metric name.
pub const METRIC_READINGS: &str = "aqi_readings_total";
/// Fallback readings counter metric name.
pub const METRIC_FALLBACKS: &str = "aqi_fallbacks_total";
/// Provider request latency metric name.
pub const METRIC_PROVIDER_LATENCY: &str = "provider_request_latency_ms";
/// Streams opened counter metric name.
pub const METRIC_WS_CONNECTIONS: &str = "ws_connections_total";
/// Currently open streams gauge metric name.
pub const METRIC_WS_ACTIVE: &str = "ws_connections_active";

/// Install the Prometheus recorder and register metric descriptions.
/// Call this once at startup.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(METRIC_READINGS, "Total number of AQI readings served");
    describe_counter!(
        METRIC_FALLBACKS,
        "Total number of AQI readings substituted by a fallback value"
    );
    describe_histogram!(
        METRIC_PROVIDER_LATENCY,
        "Outbound provider request latency in milliseconds"
    );
    describe_counter!(METRIC_WS_CONNECTIONS, "Total number of pollution streams opened");
    describe_gauge!(METRIC_WS_ACTIVE, "Number of pollution streams currently open");

    debug!("Metrics initialized");
    Ok(handle)
}

/// Count a served reading.
pub fn inc_readings(source: &'static str) {
    counter!(METRIC_READINGS, "source" => source).increment(1);
}

/// Count a fallback and why it happened.
pub fn inc_fallbacks(reason: &'static str) {
    counter!(METRIC_FALLBACKS, "reason" => reason).increment(1);
}

/// Record provider request latency.
pub fn record_provider_latency(start: Instant, provider: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_PROVIDER_LATENCY, "provider" => provider).record(latency_ms);
}

/// Track a stream for as long as the guard lives.
pub fn track_stream() -> StreamGuard {
    counter!(METRIC_WS_CONNECTIONS).increment(1);
    gauge!(METRIC_WS_ACTIVE).increment(1.0);
    StreamGuard { _private: () }
}

/// RAII guard for an open stream.
/// Decrements the active-stream gauge when dropped.
pub struct StreamGuard {
    _private: (),
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        gauge!(METRIC_WS_ACTIVE).decrement(1.0);
    }
}
