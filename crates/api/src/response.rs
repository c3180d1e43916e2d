//! Response body types for API handlers.

use cuide_core::pagination::PaginationMetadata;
use cuide_db::models::place::Place;
use serde::Serialize;

/// `{ "places": [...], "metadata": {...} }` returned by the place listings.
#[derive(Debug, Serialize)]
pub struct PlacesResponse {
    pub places: Vec<Place>,
    pub metadata: PaginationMetadata,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthResponse {
    pub fn new(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}
