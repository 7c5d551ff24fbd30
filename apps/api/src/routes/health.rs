//! Health check HTTP route handlers
//!
//! Provides endpoints for checking the health of the API and its store:
//! - `GET /health` - Simple liveness check (returns 200 OK)
//! - `GET /health/ready` - Readiness check (pings the store)
//! - `GET /health/live` - Kubernetes-style liveness probe

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::error::ApiError;
use crate::repositories::SharedStore;

/// Status of an individual dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Dependency is responding
    Healthy,
    /// Dependency is unreachable or failing
    Unhealthy,
}

/// Result of a single dependency check
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealth {
    pub name: &'static str,
    pub status: ServiceStatus,
    /// Response time in milliseconds
    pub response_time_ms: u64,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    fn healthy(name: &'static str, response_time: Duration) -> Self {
        Self {
            name,
            status: ServiceStatus::Healthy,
            response_time_ms: response_time.as_millis() as u64,
            error: None,
        }
    }

    fn unhealthy(name: &'static str, error: impl Into<String>, response_time: Duration) -> Self {
        Self {
            name,
            status: ServiceStatus::Unhealthy,
            response_time_ms: response_time.as_millis() as u64,
            error: Some(error.into()),
        }
    }
}

/// Readiness probe response body
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    /// Healthy only if every dependency is healthy
    pub status: ServiceStatus,
    pub services: Vec<ServiceHealth>,
    pub version: &'static str,
}

/// Shared application state for health check handlers
#[derive(Clone)]
pub struct HealthState {
    pub store: SharedStore,
}

impl HealthState {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

/// Create health check router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(simple_health))
        .route("/live", get(liveness_probe))
        .route("/ready", get(readiness_probe))
        .with_state(state)
}

/// Simple health check - always returns OK if the server is running
async fn simple_health() -> &'static str {
    "OK"
}

/// Liveness probe for Kubernetes
///
/// Returns 200 if the server process is running and can handle requests.
/// Does not check the store; that's what readiness is for.
async fn liveness_probe() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness probe
///
/// # Response
/// - 200 OK if the store answers a ping
/// - 503 Service Unavailable otherwise
async fn readiness_probe(State(state): State<HealthState>) -> impl IntoResponse {
    let start = Instant::now();
    let database = match state.store.ping().await {
        Ok(()) => ServiceHealth::healthy("database", start.elapsed()),
        Err(err) => {
            let err = ApiError::from(err);
            err.log();
            ServiceHealth::unhealthy("database", err.public_message(), start.elapsed())
        }
    };

    let status = database.status;
    let status_code = match status {
        ServiceStatus::Healthy => StatusCode::OK,
        ServiceStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        status_code,
        Json(ReadinessResponse {
            status,
            services: vec![database],
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
