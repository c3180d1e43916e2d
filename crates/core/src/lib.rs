//! Domain logic for the Cuide directory service.
//!
//! Everything here is free of database and HTTP dependencies: the shared
//! error type, parameter parsing, pagination math, the place filter with its
//! typed predicate, and the taxonomy kinds.

pub mod error;
pub mod filter;
pub mod pagination;
pub mod params;
pub mod taxonomy;
pub mod types;
