//! HTTP API module: AQI, heatmap, advisory, directory, and the live stream.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
