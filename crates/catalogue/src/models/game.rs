use serde::Deserialize;

use catalogue_core::storage::{Page, PageError};

/// Query parameters of `GET /api/games`.
#[derive(Debug, Default, Deserialize)]
pub struct ListGamesQuery {
    /// 1-based page number (default: 1)
    pub page: Option<u32>,
    /// Page size (default: 10, max: 100)
    pub limit: Option<u32>,
}

impl ListGamesQuery {
    /// Converts the raw parameters into a validated page.
    pub fn into_page(self) -> Result<Page, PageError> {
        Page::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(Page::DEFAULT_LIMIT),
        )
    }
}
