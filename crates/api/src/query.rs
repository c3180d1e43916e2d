//! Shared query parameter types for API handlers.

use cuide_core::error::CoreError;
use cuide_core::params::parse_page;
use cuide_core::types::PublicId;

/// Name of the page query parameter.
pub const PAGE_PARAM: &str = "page";

/// Raw `key=value` pairs, preserving repeated keys.
///
/// Extracting into pairs never fails on repeated or unknown keys, so a bad
/// `page` always surfaces as a JSON 400 from [`parse_page`].
pub type QueryPairs = Vec<(String, String)>;

/// The first `page` value among raw query pairs.
pub fn page_from_pairs(pairs: &[(String, String)]) -> Result<PublicId, CoreError> {
    let raw = pairs
        .iter()
        .find(|(key, _)| key == PAGE_PARAM)
        .map(|(_, value)| value.as_str());
    parse_page(raw)
}
