//! Taxonomy entry model and form DTO, shared by all six reference tables.

use cuide_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from any taxonomy table. Also embedded inside [`Place`] responses.
///
/// [`Place`]: crate::models::place::Place
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub id: DbId,
    pub name: String,
}

/// Payload for creating or renaming a taxonomy entry.
///
/// A missing `name` deserializes as empty so it is reported as a
/// validation failure rather than a malformed body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct TaxonomyForm {
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub name: String,
}
