//! Route definitions for places.

use axum::routing::get;
use axum::Router;

use crate::handlers::place;
use crate::state::AppState;

/// Routes mounted at `/places`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /filter    -> filter
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(place::list).post(place::create))
        .route("/filter", get(place::filter))
        .route(
            "/{id}",
            get(place::get_by_id)
                .put(place::update)
                .delete(place::delete),
        )
}
