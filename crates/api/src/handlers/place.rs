//! Handlers for the `/places` resource.
//!
//! Places are read as aggregates (taxonomies embedded) and listed 20 per
//! page alongside `{total_places, pages}`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cuide_core::error::CoreError;
use cuide_core::filter::PlaceFilter;
use cuide_core::params::parse_id;
use cuide_core::types::DbId;
use cuide_db::models::place::{NewPlace, Place, PlaceForm};
use cuide_db::repositories::PlaceRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::query::{page_from_pairs, QueryPairs};
use crate::response::PlacesResponse;
use crate::state::AppState;

const ENTITY: &str = "Place";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// GET /v1/places?page=N
///
/// A repeated `page` uses its first value, same as the filter endpoint.
pub async fn list(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> AppResult<Json<PlacesResponse>> {
    let page = page_from_pairs(&pairs)?;
    let places = PlaceRepo::list(&state.pool, page).await?;
    let metadata = PlaceRepo::pagination_metadata(&state.pool).await?;
    Ok(Json(PlacesResponse { places, metadata }))
}

/// GET /v1/places/filter?page=N&service-type=..&segment=..&regional=..&name=..
///
/// Id parameters may repeat. The count in `metadata` uses the same
/// predicate as the page.
pub async fn filter(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> AppResult<Json<PlacesResponse>> {
    let page = page_from_pairs(&pairs)?;
    let filter = PlaceFilter::from_query_pairs(
        pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())),
    );
    tracing::debug!(?filter, page, "Filtering places");

    let (places, predicate) = PlaceRepo::filter(&state.pool, &filter, page).await?;
    let metadata = PlaceRepo::filter_pagination_metadata(&state.pool, &predicate).await?;
    Ok(Json(PlacesResponse { places, metadata }))
}

/// GET /v1/places/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Place>> {
    let id = DbId::from(parse_id(&id)?);
    let place = PlaceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(place))
}

/// POST /v1/places
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<PlaceForm>,
) -> AppResult<StatusCode> {
    let id = PlaceRepo::create(&state.pool, &NewPlace::from(input)).await?;
    tracing::info!(place_id = id, "Place created");
    Ok(StatusCode::CREATED)
}

/// PUT /v1/places/{id}
///
/// Replaces every field and association of an existing place.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<PlaceForm>,
) -> AppResult<StatusCode> {
    let id = DbId::from(parse_id(&id)?);
    let affected = PlaceRepo::update(&state.pool, id, &NewPlace::from(input)).await?;
    if affected == 0 {
        return Err(not_found(id));
    }
    tracing::info!(place_id = id, affected, "Place updated");
    Ok(StatusCode::OK)
}

/// DELETE /v1/places/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = DbId::from(parse_id(&id)?);
    let deleted = PlaceRepo::delete(&state.pool, id).await?;
    if deleted == 0 {
        return Err(not_found(id));
    }
    tracing::info!(place_id = id, "Place deleted");
    Ok(StatusCode::OK)
}
