//! Health check endpoint
//!
//! Provides a liveness probe for load balancer integration.

use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;

use super::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Health status ("healthy")
    pub status: String,
    /// Server version
    pub version: String,
    /// Server uptime in seconds
    pub uptime_secs: u64,
}

/// Build the health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health - liveness probe
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
