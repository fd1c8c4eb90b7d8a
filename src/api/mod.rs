//! API module
//!
//! HTTP surface of the process. Only health checks live here; business
//! routes are registered by the embedding application.

use axum::{extract::State, http::StatusCode, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::error::AppResult;
use crate::store::StoreClient;

/// Shared state handed to handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: StoreClient,
}

impl AppState {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/store", get(store_health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness check; does not touch the store
async fn health_check() -> &'static str {
    "OK"
}

/// Readiness check against the remote store.
///
/// Transport failures surface as `AppError::Store`; a store that answers
/// without success is reported as degraded.
async fn store_health_check(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, &'static str)> {
    if state.store.verify_connection().await? {
        Ok((StatusCode::OK, "OK"))
    } else {
        Ok((StatusCode::SERVICE_UNAVAILABLE, "DEGRADED"))
    }
}
