//! Health check endpoints for Kubernetes-style liveness and readiness checks.
//!
//! - `/livez` - Basic liveness check (immediate 200, no checks)
//! - `/readyz` - Readiness check (round-trips the cart storage backend)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::state::AppState;

/// GET /livez - Basic liveness check.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness check.
///
/// Returns 200 when the cart storage answers, 503 otherwise.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> Response {
    match state.cart_repo.ping().await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "healthy": true }))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "healthy": false,
                    "error": e.to_string()
                })),
            )
                .into_response()
        }
    }
}
