//! Fixed-size pagination for place listings.

use serde::Serialize;

use crate::types::PublicId;

/// Number of places per page.
pub const PAGE_SIZE: i64 = 20;

/// Row offset of the first place on a 1-based `page`.
pub fn page_offset(page: PublicId) -> i64 {
    (i64::from(page) - 1).max(0) * PAGE_SIZE
}

/// Number of pages needed to hold `total` places (`ceil(total / PAGE_SIZE)`).
pub fn page_count(total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (total + PAGE_SIZE - 1) / PAGE_SIZE
}

/// Totals reported next to every page of places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMetadata {
    pub total_places: i64,
    pub pages: i64,
}

impl PaginationMetadata {
    pub fn from_total(total: i64) -> Self {
        Self {
            total_places: total,
            pages: page_count(total),
        }
    }
}
