//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod place_repo;
pub mod taxonomy_repo;

pub use place_repo::PlaceRepo;
pub use taxonomy_repo::TaxonomyRepo;
