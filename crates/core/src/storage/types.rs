use super::PageError;

/// A 1-based page of the game list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page {
    page: u32,
    limit: u32,
}

impl Page {
    /// Default page size when the client does not send one.
    pub const DEFAULT_LIMIT: u32 = 10;
    /// Largest page size a client may request.
    pub const MAX_LIMIT: u32 = 100;

    /// Creates a page request, validating that `page >= 1` and
    /// `1 <= limit <= MAX_LIMIT`.
    pub fn new(page: u32, limit: u32) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::InvalidPage);
        }
        if limit == 0 || limit > Self::MAX_LIMIT {
            return Err(PageError::InvalidLimit {
                max: Self::MAX_LIMIT,
            });
        }
        Ok(Self { page, limit })
    }

    /// The first page with the default limit.
    pub fn first() -> Self {
        Self {
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first()
    }
}
