//! Route definitions shared by every taxonomy resource.

use axum::routing::get;
use axum::Router;
use cuide_core::taxonomy::Taxonomy;

use crate::handlers::taxonomy;
use crate::state::AppState;

/// Routes mounted at `T::PATH`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router<T: Taxonomy>() -> Router<AppState> {
    Router::new()
        .route("/", get(taxonomy::list::<T>).post(taxonomy::create::<T>))
        .route(
            "/{id}",
            get(taxonomy::get_by_id::<T>)
                .put(taxonomy::update::<T>)
                .delete(taxonomy::delete::<T>),
        )
}
