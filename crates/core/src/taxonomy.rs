//! The six `{id, name}` reference taxonomies.
//!
//! Each taxonomy is a zero-sized marker type implementing [`Taxonomy`]. The
//! repository and handler layers are generic over the marker, so the only
//! thing that differs between taxonomies is the data declared here. Table
//! names are compile-time constants and never come from request input.

/// A reference table holding `{id, name}` rows.
pub trait Taxonomy: Send + Sync + 'static {
    /// Backing table name.
    const TABLE: &'static str;
    /// Human-readable entity label used in logs and errors.
    const ENTITY: &'static str;
    /// Plural path segment under `/v1`.
    const PATH: &'static str;
}

macro_rules! taxonomy {
    ($(#[$meta:meta])* $name:ident, $table:literal, $entity:literal, $path:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Taxonomy for $name {
            const TABLE: &'static str = $table;
            const ENTITY: &'static str = $entity;
            const PATH: &'static str = $path;
        }
    };
}

taxonomy!(
    /// Geographic region a place serves.
    Regional,
    "regionals",
    "Regional",
    "/regionals"
);
taxonomy!(
    /// Care segment (axis) a place belongs to.
    Segment,
    "segments",
    "Segment",
    "/segments"
);
taxonomy!(ServiceType, "service_types", "ServiceType", "/service-types");
taxonomy!(
    AdmissionCriterion,
    "admission_criteria",
    "AdmissionCriterion",
    "/admission-criteria"
);
taxonomy!(
    AttendanceType,
    "attendance_types",
    "AttendanceType",
    "/attendance-types"
);
taxonomy!(
    /// How people are referred to a place.
    ReferenceWay,
    "reference_ways",
    "ReferenceWay",
    "/reference-ways"
);
