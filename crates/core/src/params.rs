//! Parsing of path segments and query parameters.
//!
//! Ids and page numbers are unsigned 8-bit integers at the HTTP boundary.
//! Handlers parse them here so a malformed value becomes a
//! [`CoreError::InvalidParam`] before any repository is touched.

use crate::error::CoreError;
use crate::types::PublicId;

/// Parse an entity id from a path segment.
pub fn parse_id(raw: &str) -> Result<PublicId, CoreError> {
    raw.trim().parse::<PublicId>().map_err(|_| CoreError::InvalidParam {
        name: "id",
        value: raw.to_string(),
    })
}

/// Parse the required `page` query parameter.
///
/// Pages are 1-based, so `0` is rejected alongside missing and
/// non-numeric values.
pub fn parse_page(raw: Option<&str>) -> Result<PublicId, CoreError> {
    let invalid = || CoreError::InvalidParam {
        name: "page",
        value: raw.unwrap_or_default().to_string(),
    };

    let page = raw
        .ok_or_else(invalid)?
        .trim()
        .parse::<PublicId>()
        .map_err(|_| invalid())?;

    if page == 0 {
        return Err(invalid());
    }
    Ok(page)
}
