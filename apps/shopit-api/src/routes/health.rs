//! Health check endpoint for monitoring.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub database: &'static str,
}

/// `GET /health`
///
/// 503 when the database does not answer.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_ok = state.db.health_check().await;

    let (status, code, database) = if db_ok {
        ("ok", StatusCode::OK, "connected")
    } else {
        tracing::warn!("Health check: database unavailable");
        ("degraded", StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        code,
        Json(HealthResponse {
            status,
            service: "shopit-api",
            database,
        }),
    )
}
