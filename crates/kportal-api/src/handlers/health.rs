//! Liveness and database health probes.

use axum::{extract::State, http::StatusCode};

use crate::AppState;

pub const HEALTHY: &str = "OK";
pub const DB_HEALTHY: &str = "Database connection is healthy";
pub const DB_UNHEALTHY: &str = "Database connection failed";

/// Process liveness; never touches the store.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses((status = 200, description = "Process is up", body = String))
)]
pub async fn health() -> &'static str {
    HEALTHY
}

/// Store connectivity check.
///
/// # Returns
/// - 200 OK when a trivial query succeeds
/// - 500 Internal Server Error otherwise; the cause is only logged
#[utoipa::path(
    get,
    path = "/health/db",
    tag = "System",
    responses(
        (status = 200, description = "Database reachable", body = String),
        (status = 500, description = "Database unreachable", body = String)
    )
)]
pub async fn health_db(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, DB_HEALTHY),
        Err(e) => {
            tracing::error!(
                subsystem = "api",
                component = "health",
                error = %e,
                "Database health check failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, DB_UNHEALTHY)
        }
    }
}
