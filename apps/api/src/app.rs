//! HTTP application assembly
//!
//! Builds the axum router serving GraphQL and health endpoints, with request
//! tracing and CORS applied to every route.

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::graphql::Executor;
use crate::repositories::SharedStore;
use crate::routes::{graphql_router, health_router, HealthState};

/// Build the CORS layer based on configuration.
///
/// In production mode:
/// - If `CORS_ORIGINS` is set, only those origins are allowed
/// - If `CORS_ORIGINS` is not set, CORS requests are rejected (no origins allowed)
///
/// In development mode:
/// - If `CORS_ORIGINS` is set, those origins are used
/// - If `CORS_ORIGINS` is not set, permissive CORS is used for convenience
pub fn build_cors_layer(config: &Config) -> CorsLayer {
    match &config.cors_allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<_> = origins
                .iter()
                .filter_map(|origin| {
                    origin.parse().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                        None
                    })
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::error!("No valid CORS origins configured, CORS requests will be rejected");
                CorsLayer::new()
            } else {
                tracing::info!(
                    "CORS configured with {} allowed origin(s): {:?}",
                    allowed_origins.len(),
                    origins
                );
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                    .max_age(std::time::Duration::from_secs(3600))
            }
        }
        _ if config.is_production() => {
            tracing::warn!(
                "CORS_ORIGINS not configured in production mode. \
                 CORS requests will be rejected. Set CORS_ORIGINS to allow cross-origin requests."
            );
            CorsLayer::new()
        }
        _ => {
            tracing::warn!(
                "Using permissive CORS in development mode. \
                 Set CORS_ORIGINS for production-like behavior."
            );
            CorsLayer::permissive()
        }
    }
}

/// Build the router without the CORS layer
///
/// Routes:
/// - `POST /graphql`, `GET /graphql/playground` (when enabled)
/// - `GET /health`, `/health/live`, `/health/ready`
pub fn router(executor: Executor, store: SharedStore, playground: bool) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/graphql", graphql_router(executor, playground))
        .nest("/health", health_router(HealthState::new(store)))
        .layer(TraceLayer::new_for_http())
}

/// Build the complete application for `config`
pub fn app(config: &Config, store: SharedStore) -> Router {
    let executor = Executor::from_config(store.clone(), &config.graphql);
    router(executor, store, config.graphql.playground).layer(build_cors_layer(config))
}

async fn root() -> &'static str {
    "Quill GraphQL API"
}
