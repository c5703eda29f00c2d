//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::DEFAULT_PAGE_NUMBER;

/// Pagination query parameters.
///
/// The page is kept as raw text so a malformed value falls back to the
/// first page instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number (defaults to 1)
    #[param(example = "1")]
    pub page: Option<String>,
}

impl PageQuery {
    /// Requested page number, normalized to at least 1
    pub fn number(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .map(|p| p as u64)
            .unwrap_or(DEFAULT_PAGE_NUMBER)
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(PostPage = Paginated<crate::domain::PostSummary>)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    /// Total number of items across all pages
    pub total: u64,
    /// Fixed page size
    pub per_page: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, total: u64, per_page: u64) -> Self {
        Self {
            data,
            total,
            per_page,
        }
    }
}
