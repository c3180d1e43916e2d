//! Liveness check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::response::HealthResponse;
use crate::state::AppState;

/// GET /health
///
/// 200 while the database answers, 503 otherwise. The body has the same
/// shape either way, so monitors can read `db_healthy` without checking
/// the status code.
pub async fn check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match cuide_db::health_check(&state.pool).await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::new(true))),
        Err(err) => {
            tracing::warn!(error = %err, "Database unreachable during health check");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::new(false)),
            )
        }
    }
}
