use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Welcome payload served at `/`.
#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Name of the classifier serving predictions.
    pub model: &'static str,
    /// Always true once the server is up; the classifier is built at startup.
    pub model_loaded: bool,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET / -- welcome message.
async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the IyaCare AI Risk Prediction API!",
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health -- returns service and classifier status.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model: state.classifier.name(),
        model_loaded: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Mount the welcome and health routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
}
