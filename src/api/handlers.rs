//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::{ws::WebSocketUpgrade, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::advisory::AdvisoryService;
use crate::aqi::{LiveMetricFacade, ReadingSource};
use crate::config::Config;
use crate::heatmap::{build_heatmap, Heatmap};
use crate::resources::{self, MedicalResource};
use crate::stream;

/// Page the login and signup stubs redirect to.
pub const DASHBOARD_PATH: &str = "/dashboard.html";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Immutable configuration.
    pub config: Arc<Config>,
    /// AQI facade.
    pub facade: Arc<LiveMetricFacade>,
    /// Advisory text service.
    pub advisory: Arc<AdvisoryService>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("facade", &self.facade)
            .field("advisory", &self.advisory)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    /// Create app state from already-built services.
    pub fn new(config: Config, facade: LiveMetricFacade, advisory: AdvisoryService) -> Self {
        Self {
            config: Arc::new(config),
            facade: Arc::new(facade),
            advisory: Arc::new(advisory),
            metrics: None,
        }
    }

    /// Build all services from config.
    pub fn from_config(config: Config) -> crate::Result<Self> {
        let facade = LiveMetricFacade::from_config(&config)?;
        let advisory = AdvisoryService::from_config(&config)?;
        Ok(Self::new(config, facade, advisory))
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    fn city(&self, query: CityQuery) -> String {
        query.city.unwrap_or_else(|| self.config.default_city.clone())
    }
}

/// `?city=` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct CityQuery {
    /// City name; defaults to the configured default city.
    pub city: Option<String>,
}

/// `?query=` search parameter.
#[derive(Debug, Default, Deserialize)]
pub struct ResourceQuery {
    /// Substring to match; empty matches everything.
    #[serde(default)]
    pub query: String,
}

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User message.
    #[serde(default)]
    pub message: String,
}

/// Login form. Credentials are accepted unconditionally.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct LoginForm {
    email: String,
    password: String,
}

/// Signup form. Nothing is stored.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct SignupForm {
    name: String,
    email: String,
    password: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
    /// Whether live AQI lookups are configured.
    pub live_aqi: bool,
    /// Whether advisory generation is configured.
    pub advisory: bool,
}

/// One-shot AQI response.
#[derive(Debug, Serialize, Deserialize)]
pub struct AqiResponse {
    /// AQI value.
    pub aqi: u32,
    /// City the reading is for.
    pub city: String,
    /// Live or fallback.
    pub source: ReadingSource,
    /// When the reading was produced.
    #[serde(with = "time::serde::rfc3339")]
    pub observed_at: OffsetDateTime,
}

/// Recommendations response.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    /// Advisory text, or an inline error message.
    pub recommendations: String,
    /// AQI the advice was generated for.
    pub aqi: u32,
    /// City.
    pub city: String,
}

/// Chat response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Reply text, or an inline error message.
    pub response: String,
}

/// Health check handler - always returns 200.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        live_aqi: state.facade.is_live(),
        advisory: state.advisory.is_configured(),
    })
}

/// Current AQI for a city.
pub async fn aqi(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> impl IntoResponse {
    let city = state.city(query);
    let reading = state.facade.resolve(&city).await;

    Json(AqiResponse {
        aqi: reading.value,
        city,
        source: reading.source,
        observed_at: reading.observed_at,
    })
}

/// Heatmap points around the current AQI.
pub async fn heatmap_data(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Json<Heatmap> {
    let city = state.city(query);
    let base = state.facade.resolve(&city).await.value;
    Json(build_heatmap(base, &city, &mut rand::rng()))
}

/// Hospital-manager recommendations for the current AQI.
pub async fn recommendations(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> impl IntoResponse {
    let city = state.city(query);
    let aqi = state.facade.resolve(&city).await.value;
    let recommendations = state.advisory.recommendations(aqi, &city).await;

    Json(RecommendationsResponse {
        recommendations,
        aqi,
        city,
    })
}

/// Single-turn chatbot relay.
pub async fn chatbot(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> impl IntoResponse {
    Json(ChatResponse {
        response: state.advisory.chat(&body.message).await,
    })
}

/// Medical resource search with simulated live availability.
pub async fn medical_resources(Query(query): Query<ResourceQuery>) -> Json<Vec<MedicalResource>> {
    Json(resources::search(&query.query, &mut rand::rng()))
}

/// Login stub: always redirects to the dashboard.
pub async fn login(Form(form): Form<LoginForm>) -> Redirect {
    debug!(email = %form.email, "Login accepted");
    Redirect::to(DASHBOARD_PATH)
}

/// Signup stub: always redirects to the dashboard.
pub async fn signup(Form(form): Form<SignupForm>) -> Redirect {
    debug!(email = %form.email, "Signup accepted");
    Redirect::to(DASHBOARD_PATH)
}

/// Prometheus exposition, 404 when no recorder is installed.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Upgrade to the live pollution stream.
pub async fn pollution_ws(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let city = state.city(query);
    let facade = state.facade.clone();
    let interval = state.config.poll_interval();

    ws.on_upgrade(move |socket| async move {
        info!(city = %city, "Pollution stream opened");
        stream::pollution_socket(socket, facade, city, interval).await;
    })
}
