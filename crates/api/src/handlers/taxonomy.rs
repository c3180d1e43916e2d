//! Handlers shared by the six taxonomy resources.
//!
//! Each handler is generic over the [`Taxonomy`] marker; the router mounts
//! one instantiation per resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cuide_core::error::CoreError;
use cuide_core::params::parse_id;
use cuide_core::taxonomy::Taxonomy;
use cuide_core::types::DbId;
use cuide_db::models::taxonomy::{TaxonomyEntry, TaxonomyForm};
use cuide_db::repositories::TaxonomyRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::state::AppState;

fn not_found<T: Taxonomy>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: T::ENTITY,
        id,
    })
}

/// GET /v1/{taxonomy}
pub async fn list<T: Taxonomy>(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TaxonomyEntry>>> {
    let entries = TaxonomyRepo::<T>::list(&state.pool).await?;
    Ok(Json(entries))
}

/// POST /v1/{taxonomy}
pub async fn create<T: Taxonomy>(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<TaxonomyForm>,
) -> AppResult<StatusCode> {
    let entry = TaxonomyRepo::<T>::create(&state.pool, &input).await?;
    tracing::info!(entity = T::ENTITY, id = entry.id, "Taxonomy entry created");
    Ok(StatusCode::CREATED)
}

/// GET /v1/{taxonomy}/{id}
pub async fn get_by_id<T: Taxonomy>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TaxonomyEntry>> {
    let id = DbId::from(parse_id(&id)?);
    let entry = TaxonomyRepo::<T>::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found::<T>(id))?;
    Ok(Json(entry))
}

/// PUT /v1/{taxonomy}/{id}
///
/// Replaces the name of an existing entry.
pub async fn update<T: Taxonomy>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<TaxonomyForm>,
) -> AppResult<StatusCode> {
    let id = DbId::from(parse_id(&id)?);
    let updated = TaxonomyRepo::<T>::update(&state.pool, id, &input).await?;
    if updated == 0 {
        return Err(not_found::<T>(id));
    }
    tracing::info!(entity = T::ENTITY, id, "Taxonomy entry updated");
    Ok(StatusCode::OK)
}

/// DELETE /v1/{taxonomy}/{id}
pub async fn delete<T: Taxonomy>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = DbId::from(parse_id(&id)?);
    let deleted = TaxonomyRepo::<T>::delete(&state.pool, id).await?;
    if deleted == 0 {
        return Err(not_found::<T>(id));
    }
    tracing::info!(entity = T::ENTITY, id, "Taxonomy entry deleted");
    Ok(StatusCode::OK)
}
