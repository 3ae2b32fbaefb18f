//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use tutor_core::Snowflake;

use crate::response::HealthStatus;
use crate::state::AppState;

/// Liveness check
///
/// GET /health
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

/// Readiness check
///
/// GET /health/ready
///
/// Probes the store through the repository port; a failing store means
/// the process is alive but not ready to serve traffic.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthStatus>, StatusCode> {
    match state
        .service_context()
        .room_repo()
        .find_by_id(Snowflake::new(0))
        .await
    {
        Ok(_) => Ok(Json(HealthStatus { status: "ready" })),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness probe failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
