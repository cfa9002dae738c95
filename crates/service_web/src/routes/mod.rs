//! Route modules for the web calculator
//!
//! - calculator: the HTML form and pricing handler
//! - health: liveness endpoint for monitoring

pub mod calculator;
pub mod health;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self {
            config,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(config: Arc<ServerConfig>) -> Router {
    let state = AppState::new(config);

    Router::new()
        .merge(calculator::routes())
        .merge(health::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_build_router_serves_form_and_health() {
        let config = Arc::new(ServerConfig::default());
        let router = build_router(config);

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let config = Arc::new(ServerConfig::default());
        let router = build_router(config);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/unknown/path")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_app_state_config_access() {
        let config = Arc::new(ServerConfig {
            port: 9999,
            ..Default::default()
        });
        let state = AppState::new(config);
        assert_eq!(state.config.port, 9999);
    }
}
