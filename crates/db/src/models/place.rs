//! Place model, row mapping and form DTO.

use cuide_core::types::{DbId, PublicId};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::models::taxonomy::TaxonomyEntry;

/// Raw row produced by the place aggregate query.
///
/// The joined taxonomies arrive as `jsonb` columns and are decoded through
/// [`Json`]. Many-to-many columns are always arrays (possibly empty).
#[derive(Debug, Clone, FromRow)]
pub struct PlaceRow {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub website: String,
    pub observations: String,
    pub google_maps_link: String,
    pub google_maps_embed_link: String,
    pub service_type: Json<TaxonomyEntry>,
    pub segment: Json<TaxonomyEntry>,
    pub regionals: Json<Vec<TaxonomyEntry>>,
    pub reference_ways: Json<Vec<TaxonomyEntry>>,
    pub admission_criteria: Json<Vec<TaxonomyEntry>>,
    pub attendance_types: Json<Vec<TaxonomyEntry>>,
}

/// A place with its taxonomies embedded, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Place {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub website: String,
    pub observations: String,
    pub google_maps_link: String,
    pub google_maps_embed_link: String,
    pub service_type: TaxonomyEntry,
    pub segment: TaxonomyEntry,
    pub regionals: Vec<TaxonomyEntry>,
    pub reference_ways: Vec<TaxonomyEntry>,
    pub admission_criteria: Vec<TaxonomyEntry>,
    pub attendance_types: Vec<TaxonomyEntry>,
}

impl From<PlaceRow> for Place {
    fn from(row: PlaceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            phone_number: row.phone_number,
            website: row.website,
            observations: row.observations,
            google_maps_link: row.google_maps_link,
            google_maps_embed_link: row.google_maps_embed_link,
            service_type: row.service_type.0,
            segment: row.segment.0,
            regionals: row.regionals.0,
            reference_ways: row.reference_ways.0,
            admission_criteria: row.admission_criteria.0,
            attendance_types: row.attendance_types.0,
        }
    }
}

/// Payload for `POST /v1/places` and `PUT /v1/places/{id}`.
///
/// Absent fields fall back to their defaults so that a missing required
/// field is reported by validation (422) instead of by the JSON decoder.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PlaceForm {
    #[validate(length(min = 1, max = 2500, message = "must be 1 to 2500 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 2500, message = "must be 1 to 2500 characters"))]
    pub address: String,
    #[validate(length(max = 2500, message = "must be at most 2500 characters"))]
    pub phone_number: String,
    #[validate(length(max = 2500, message = "must be at most 2500 characters"))]
    pub website: String,
    pub observations: String,
    #[validate(length(min = 1, message = "is required"))]
    pub google_maps_link: String,
    pub google_maps_embed_link: String,
    #[validate(range(min = 1, message = "is required"))]
    pub service_type_id: PublicId,
    #[validate(range(min = 1, message = "is required"))]
    pub segment_id: PublicId,
    #[validate(length(min = 1, message = "must contain at least one id"))]
    pub regional_ids: Vec<PublicId>,
    #[validate(length(min = 1, message = "must contain at least one id"))]
    pub reference_ways_ids: Vec<PublicId>,
    #[validate(length(min = 1, message = "must contain at least one id"))]
    pub admission_criteria_ids: Vec<PublicId>,
    #[validate(length(min = 1, message = "must contain at least one id"))]
    pub attendance_type_ids: Vec<PublicId>,
}

/// A validated place ready to be written.
///
/// Association id lists are sorted and free of duplicates, so each id
/// produces exactly one junction row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlace {
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub website: String,
    pub observations: String,
    pub google_maps_link: String,
    pub google_maps_embed_link: String,
    pub service_type_id: DbId,
    pub segment_id: DbId,
    pub regional_ids: Vec<DbId>,
    pub reference_way_ids: Vec<DbId>,
    pub admission_criterion_ids: Vec<DbId>,
    pub attendance_type_ids: Vec<DbId>,
}

impl From<PlaceForm> for NewPlace {
    fn from(form: PlaceForm) -> Self {
        Self {
            name: form.name,
            address: form.address,
            phone_number: form.phone_number,
            website: form.website,
            observations: form.observations,
            google_maps_link: form.google_maps_link,
            google_maps_embed_link: form.google_maps_embed_link,
            service_type_id: DbId::from(form.service_type_id),
            segment_id: DbId::from(form.segment_id),
            regional_ids: to_id_set(&form.regional_ids),
            reference_way_ids: to_id_set(&form.reference_ways_ids),
            admission_criterion_ids: to_id_set(&form.admission_criteria_ids),
            attendance_type_ids: to_id_set(&form.attendance_type_ids),
        }
    }
}

fn to_id_set(ids: &[PublicId]) -> Vec<DbId> {
    let mut ids: Vec<DbId> = ids.iter().copied().map(DbId::from).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PlaceForm {
        PlaceForm {
            name: "CAPS Norte".to_string(),
            address: "Rua A, 100".to_string(),
            phone_number: "(31) 3277-0000".to_string(),
            website: "https://example.org".to_string(),
            observations: String::new(),
            google_maps_link: "https://maps.example/caps".to_string(),
            google_maps_embed_link: String::new(),
            service_type_id: 1,
            segment_id: 1,
            regional_ids: vec![1],
            reference_ways_ids: vec![1],
            admission_criteria_ids: vec![1],
            attendance_type_ids: vec![1],
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn empty_association_lists_fail() {
        let form = PlaceForm {
            regional_ids: vec![],
            attendance_type_ids: vec![],
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("regional_ids"));
        assert!(fields.contains_key("attendance_type_ids"));
        assert!(!fields.contains_key("reference_ways_ids"));
    }

    #[test]
    fn zero_service_type_fails() {
        let form = PlaceForm {
            service_type_id: 0,
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("service_type_id"));
    }

    #[test]
    fn missing_required_text_fails() {
        let form = PlaceForm {
            name: String::new(),
            google_maps_link: String::new(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("google_maps_link"));
    }

    #[test]
    fn overlong_phone_number_fails() {
        let form = PlaceForm {
            phone_number: "9".repeat(2501),
            ..valid_form()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn empty_body_fails_every_required_field() {
        let form: PlaceForm = serde_json::from_str("{}").unwrap();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 9);
    }

    #[test]
    fn conversion_deduplicates_association_ids() {
        let form = PlaceForm {
            regional_ids: vec![3, 1, 3, 2],
            ..valid_form()
        };
        let place = NewPlace::from(form);
        assert_eq!(place.regional_ids, vec![1, 2, 3]);
        assert_eq!(place.service_type_id, 1);
    }
}
