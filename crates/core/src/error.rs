use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A path segment or query parameter that could not be parsed.
    #[error("Invalid parameter '{name}': {value:?}")]
    InvalidParam { name: &'static str, value: String },
}
