//! Periodic AQI push over a long-lived connection.
//!
//! This module handles:
//! - The update payload and the sink seam
//! - The polling loop bound to a connection's lifetime
//! - The axum WebSocket sink
//! - Mock sink for testing

pub mod mock;
pub mod poller;
pub mod ws;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::aqi::AqiReading;
use crate::error::StreamError;

pub use mock::MockSink;
pub use poller::{stream_readings, StreamExit};
pub use ws::{pollution_socket, WsSink};

/// Update pushed to stream subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollutionUpdate {
    /// Display label, e.g. `"Delhi (Live)"`.
    pub location: String,
    /// AQI value.
    pub aqi: u32,
}

impl From<&AqiReading> for PollutionUpdate {
    fn from(reading: &AqiReading) -> Self {
        Self {
            location: format!("{} (Live)", reading.location),
            aqi: reading.value,
        }
    }
}

/// Push side of a streaming connection.
#[async_trait]
pub trait UpdateSink: Send {
    /// Send one update. Errors mean the connection is unusable.
    async fn send(&mut self, update: &PollutionUpdate) -> Result<(), StreamError>;

    /// Release the connection. Called exactly once, on every exit path.
    async fn close(&mut self);
}
