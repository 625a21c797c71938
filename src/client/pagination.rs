//! Pagination helpers for API requests
//!
//! Provides the parameter types sent to the Zammad API and the sequential
//! page walker used for full fetches.

use std::future::Future;

use log::debug;

use crate::error::Result;

/// Maximum page size accepted by the Zammad search endpoint.
/// Also the default, to minimize API calls.
pub const MAX_PAGE_SIZE: usize = 500;

/// Default sort field for ticket listings (newest first).
pub const DEFAULT_SORT_FIELD: &str = "created_at";

/// Pagination parameters for ticket requests.
///
/// Use the builder pattern to configure pagination options.
///
/// # Example
/// ```ignore
/// let params = PaginationParams::new()
///     .page_size(100)
///     .page(2)
///     .fetch_all(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginationParams {
    /// Number of items per page (default: 500, max: 500)
    pub page_size: Option<usize>,
    /// Page number, 1-indexed
    pub page: Option<usize>,
    /// Sort field name
    pub sort_by: Option<String>,
    /// Sort order
    pub sort_order: Option<SortOrder>,
    /// Keep requesting pages until the upstream runs dry
    pub fetch_all: bool,
}

/// Sort order for paginated requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9, oldest first)
    Asc,
    /// Descending order (Z-A, 9-0, newest first)
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl PaginationParams {
    /// Create new pagination params with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size (items per page).
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set the page number.
    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the sort field.
    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    /// Set the sort order.
    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// Request every page instead of just one.
    pub fn fetch_all(mut self, fetch_all: bool) -> Self {
        self.fetch_all = fetch_all;
        self
    }

    /// Effective page size: defaults to, and is clamped at, `MAX_PAGE_SIZE`.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.unwrap_or(MAX_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Effective first page (1-indexed).
    pub fn first_page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Convert to query string parameters for the given page.
    ///
    /// Uses the Zammad search endpoint parameter names:
    /// - `query`: always `*` to match every ticket
    /// - `page`: 1-indexed page number
    /// - `per_page`: number of elements per page
    /// - `sort_by`: field to sort by (default `created_at`)
    /// - `order_by`: 'asc' or 'desc' (default 'desc')
    pub fn to_query_params(&self, page: usize) -> Vec<(&'static str, String)> {
        let sort_by = self
            .sort_by
            .clone()
            .unwrap_or_else(|| DEFAULT_SORT_FIELD.to_string());
        let order = self.sort_order.unwrap_or(SortOrder::Desc);

        vec![
            ("query", "*".to_string()),
            ("page", page.to_string()),
            ("per_page", self.effective_page_size().to_string()),
            ("sort_by", sort_by),
            ("order_by", order.as_str().to_string()),
        ]
    }
}

/// Offset-based listing parameters used by the organization and user endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListParams {
    pub fn new(limit: Option<usize>, offset: Option<usize>) -> Self {
        Self { limit, offset }
    }

    /// Convert to query string parameters. Zero values are left out.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }

        if let Some(offset) = self.offset.filter(|o| *o > 0) {
            params.push(("offset", offset.to_string()));
        }

        params
    }
}

/// Walk pages sequentially, starting at `params.first_page()`.
///
/// Stops after one page unless `params.fetch_all` is set. In full-fetch mode
/// the walk ends on the first empty page or the first page shorter than the
/// page size; page N+1 is only requested after page N has been decoded.
pub async fn collect_pages<T, F, Fut>(params: &PaginationParams, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let page_size = params.effective_page_size();
    let mut page = params.first_page();
    let mut all_items = Vec::new();

    loop {
        let items = fetch_page(page).await?;
        let count = items.len();
        debug!("Page {} returned {} items", page, count);

        if count == 0 {
            break;
        }

        all_items.extend(items);

        if !params.fetch_all || count < page_size {
            break;
        }

        page += 1;
    }

    debug!("Fetched {} total items", all_items.len());
    Ok(all_items)
}
