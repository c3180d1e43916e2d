//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` struct matching what queries return
//! - A `Deserialize` + `Validate` form DTO for create/update payloads

pub mod place;
pub mod taxonomy;
