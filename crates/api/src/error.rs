use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cuide_core::error::CoreError;
use serde::Serialize;
use serde_json::json;
use validator::ValidationErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent responses:
/// 404 with an empty body, 422 with field errors, and
/// `{"error", "code"}` JSON for everything else.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cuide_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Field-level validation failures on a request body.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A malformed request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// One entry of the 422 response body.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity = *entity, id = *id, "Entity not found");
                    (StatusCode::NOT_FOUND, "NOT_FOUND", String::new())
                }
                CoreError::InvalidParam { .. } => {
                    (StatusCode::BAD_REQUEST, "INVALID_PARAM", core.to_string())
                }
            },

            // --- Validation ---
            AppError::Validation(errors) => return validation_response(errors),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        // Missing resources carry no body.
        if status == StatusCode::NOT_FOUND {
            return status.into_response();
        }

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, Json(body)).into_response()
    }
}

/// Render validation failures as `422 {"errors": [{"field", "error"}]}`,
/// sorted by field name.
fn validation_response(errors: &ValidationErrors) -> Response {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                error: error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string()),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "errors": field_errors })),
    )
        .into_response()
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message; the detail is
///   only logged.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", String::new()),
        sqlx::Error::Database(db_err) => {
            tracing::error!(
                error = %db_err,
                code = db_err.code().as_deref().unwrap_or("unknown"),
                "Database error"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
