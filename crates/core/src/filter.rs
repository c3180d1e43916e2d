//! Place filtering: query parsing and predicate composition.
//!
//! A [`PlaceFilter`] is parsed from the raw query pairs of
//! `GET /v1/places/filter` and turned into a [`PlacePredicate`], a list of
//! typed clauses. The database layer renders the same predicate twice, once
//! for the page of places and once for the matching count, binding every
//! value as a parameter.
//!
//! Composition rules:
//! - ids within one dimension are OR-ed;
//! - dimensions (and the name clause) are AND-ed;
//! - an empty dimension adds no clause at all.

use crate::types::{DbId, PublicId};

/// Query parameter carrying service type ids.
pub const SERVICE_TYPE_PARAM: &str = "service-type";
/// Query parameter carrying segment ids.
pub const SEGMENT_PARAM: &str = "segment";
/// Query parameter carrying region ids.
pub const REGIONAL_PARAM: &str = "regional";
/// Query parameter carrying the free-text name search.
pub const NAME_PARAM: &str = "name";

/// A filterable id dimension of a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    /// `places.service_type_id`
    ServiceType,
    /// `places.segment_id`
    Segment,
    /// Membership in `place_regionals`.
    Regional,
}

/// A single typed condition on places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateClause {
    /// The place matches any of `ids` in `dimension`.
    IdIn {
        dimension: FilterDimension,
        ids: Vec<DbId>,
    },
    /// Case-insensitive substring match on the place name or the name of an
    /// associated attendance type. Holds the raw search text.
    NameContains(String),
}

/// Conjunction of [`PredicateClause`]s. Empty means "every place".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacePredicate {
    clauses: Vec<PredicateClause>,
}

impl PlacePredicate {
    pub fn clauses(&self) -> &[PredicateClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Filter criteria for the places listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceFilter {
    pub service_types: Vec<PublicId>,
    pub segments: Vec<PublicId>,
    pub regionals: Vec<PublicId>,
    pub name: Option<String>,
}

impl PlaceFilter {
    /// Build a filter from raw query pairs.
    ///
    /// Repeated id parameters accumulate. Values that do not parse as
    /// [`PublicId`] are dropped rather than failing the request. For
    /// `name`, the last occurrence wins. Unknown keys (including `page`)
    /// are ignored.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = Self::default();

        for (key, value) in pairs {
            match key {
                SERVICE_TYPE_PARAM => push_id(&mut filter.service_types, value),
                SEGMENT_PARAM => push_id(&mut filter.segments, value),
                REGIONAL_PARAM => push_id(&mut filter.regionals, value),
                NAME_PARAM => filter.name = Some(value.to_string()),
                _ => {}
            }
        }

        filter
    }

    /// Compose the typed predicate for this filter.
    pub fn predicate(&self) -> PlacePredicate {
        let mut clauses = Vec::new();

        for (dimension, ids) in [
            (FilterDimension::ServiceType, &self.service_types),
            (FilterDimension::Segment, &self.segments),
            (FilterDimension::Regional, &self.regionals),
        ] {
            if ids.is_empty() {
                continue;
            }
            let mut ids: Vec<DbId> = ids.iter().copied().map(DbId::from).collect();
            ids.sort_unstable();
            ids.dedup();
            clauses.push(PredicateClause::IdIn { dimension, ids });
        }

        if let Some(name) = self.name.as_deref().map(str::trim) {
            if !name.is_empty() {
                clauses.push(PredicateClause::NameContains(name.to_string()));
            }
        }

        PlacePredicate { clauses }
    }
}

fn push_id(ids: &mut Vec<PublicId>, raw: &str) {
    if let Ok(id) = raw.trim().parse::<PublicId>() {
        ids.push(id);
    }
}

/// Build an `ILIKE` pattern matching `text` anywhere in a column.
///
/// `%`, `_` and the escape character itself are escaped so the search text
/// is always matched literally.
pub fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
