//! Route definitions for the health check.

use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Routes mounted at the root, outside `/v1`.
///
/// ```text
/// GET /health -> check
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health::check))
}
