//! Live air-quality facade and hospital advisory backend.
//!
//! Resolves a best-effort Air Quality Index for a city and serves it on
//! demand, as a heatmap, and as a periodic WebSocket push. Readings come from
//! a web search answer when a Serper key is configured; otherwise, or when the
//! lookup fails in any way, a synthetic value in a fixed plausible range is
//! substituted. Callers always get a number.
//!
//! ```text
//! GET /api/aqi?city=Delhi
//!   Serper "live aqi in Delhi" -> "The current AQI is 142 today" -> 142 (live)
//!   no key / error / no number                                   -> 50..=250 (fallback)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`aqi`]: Reading resolution with fallback
//! - [`stream`]: Periodic push bound to a connection's lifetime
//! - [`heatmap`]: Jittered per-region points
//! - [`advisory`]: Generated recommendations and chat
//! - [`resources`]: Medical resource directory
//! - [`api`]: HTTP and WebSocket routes
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod advisory;
pub mod api;
pub mod aqi;
pub mod config;
pub mod error;
pub mod heatmap;
pub mod metrics;
pub mod resources;
pub mod stream;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
