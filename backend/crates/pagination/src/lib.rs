//! Page-number pagination primitives shared by listing endpoints.
//!
//! A [`PageRequest`] carries a validated one-based page number and page size
//! and yields the row offset for `LIMIT`/`OFFSET` queries. [`PageMeta`]
//! describes the served page against a total row count, and [`Page`] bundles
//! the page items with that metadata.
//!
//! ```
//! use pagination::{Page, PageMeta, PageRequest};
//!
//! let request = PageRequest::new(3, 20).expect("valid request");
//! assert_eq!(request.offset(), 40);
//!
//! let page = Page::new(vec!["a", "b"], PageMeta::new(request, 42));
//! assert_eq!(page.meta().total_pages(), 3);
//! ```

use serde::Serialize;
use thiserror::Error;

/// Page size applied when the caller does not provide one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Validation failures raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page numbers are one-based.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one row.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// The requested page size exceeds [`MAX_PAGE_SIZE`].
    #[error("page size must be at most {max}")]
    PageSizeTooLarge {
        /// Largest accepted page size.
        max: u32,
    },
}

/// Validated page selection.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= page_size <= MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a request from an explicit page number and size.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either value is zero or the page size
    /// exceeds [`MAX_PAGE_SIZE`].
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(PageRequestError::PageSizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, page_size })
    }

    /// Build a request from optional query values, applying defaults.
    ///
    /// Missing pages default to `1` and missing sizes to
    /// [`DEFAULT_PAGE_SIZE`].
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when a provided value is out of range.
    pub fn from_optional(
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Self, PageRequestError> {
        Self::new(page.unwrap_or(1), page_size.unwrap_or(DEFAULT_PAGE_SIZE))
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of rows on the page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows to skip before the first row of this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    /// Row limit for this page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.page_size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata returned alongside a page of items.
///
/// Serialises as `{"total", "page", "pageSize", "totalPages"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    total: u64,
    page: u32,
    page_size: u32,
    total_pages: u64,
}

impl PageMeta {
    /// Describe `request` against `total` available rows.
    ///
    /// `total_pages` is `ceil(total / page_size)`, so an empty result set
    /// reports zero pages.
    #[must_use]
    pub const fn new(request: PageRequest, total: u64) -> Self {
        Self {
            total,
            page: request.page,
            page_size: request.page_size,
            total_pages: total.div_ceil(request.page_size as u64),
        }
    }

    /// Total number of rows across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// One-based page number that was served.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size that was applied.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of pages needed to cover `total` rows.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }
}

/// A page of items together with its [`PageMeta`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    pagination: PageMeta,
}

impl<T> Page<T> {
    /// Bundle `items` with their metadata.
    #[must_use]
    pub const fn new(items: Vec<T>, pagination: PageMeta) -> Self {
        Self { items, pagination }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Pagination metadata.
    #[must_use]
    pub const fn meta(&self) -> PageMeta {
        self.pagination
    }

    /// Split the page into its items and metadata.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, PageMeta) {
        (self.items, self.pagination)
    }

    /// Transform every item while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
