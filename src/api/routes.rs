//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    aqi, chatbot, health, heatmap_data, login, medical_resources, metrics, pollution_ws,
    recommendations, signup, AppState,
};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let frontend = ServeDir::new(&state.config.frontend_dir).append_index_html_on_directories(true);

    Router::new()
        // Health and metrics
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        // Air quality
        .route("/api/aqi", get(aqi))
        .route("/api/heatmap_data", get(heatmap_data))
        .route("/ws/pollution", get(pollution_ws))
        // Advisory
        .route("/api/recommendations", get(recommendations))
        .route("/api/chatbot", post(chatbot))
        // Directory
        .route("/api/resources", get(medical_resources))
        // Account stubs
        .route("/login", post(login))
        .route("/signup", post(signup))
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
