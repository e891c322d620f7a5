//! Page-number pagination primitives for listing endpoints.
//!
//! The listing endpoints accept a 1-based `page` query parameter and a fixed
//! page size. This crate turns those inputs plus a total row count into the
//! metadata a view needs (page count, previous/next links) and the
//! `LIMIT`/`OFFSET` window a repository needs.
//!
//! Everything here is pure: identical inputs always produce identical
//! [`Page`] values.
//!
//! # Examples
//! ```
//! use pagination::{DEFAULT_PAGE_SIZE, PageNumber, paginate};
//!
//! let page = paginate(25, PageNumber::parse(Some("3")), DEFAULT_PAGE_SIZE);
//! assert_eq!(page.total_pages(), 3);
//! assert!(page.has_prev());
//! assert!(!page.has_next());
//! assert_eq!(page.offset(), 20);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used by the user listing.
pub const DEFAULT_PAGE_SIZE: PageSize = PageSize(10);

/// Errors raised when constructing a [`PageSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// Page size must be at least one row.
    #[error("page size must be greater than zero")]
    Zero,
}

/// Number of rows per page.
///
/// ## Invariants
/// - Always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct PageSize(u64);

impl PageSize {
    /// Validate and construct a page size.
    ///
    /// # Errors
    /// Returns [`PageSizeError::Zero`] when `rows` is zero.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageSize, PageSizeError};
    ///
    /// assert_eq!(PageSize::new(25).map(PageSize::get), Ok(25));
    /// assert_eq!(PageSize::new(0), Err(PageSizeError::Zero));
    /// ```
    pub const fn new(rows: u64) -> Result<Self, PageSizeError> {
        if rows == 0 {
            return Err(PageSizeError::Zero);
        }
        Ok(Self(rows))
    }

    /// Rows per page.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for u64 {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

/// Requested 1-based page number.
///
/// Construction never fails: anything that is not a positive integer is
/// coerced to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(u64);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Build a page number, mapping `0` to the first page.
    #[must_use]
    pub const fn new(page: u64) -> Self {
        if page == 0 { Self::FIRST } else { Self(page) }
    }

    /// Coerce a raw query-string value into a page number.
    ///
    /// Missing, non-numeric, zero, and negative values resolve to
    /// [`PageNumber::FIRST`]. Surrounding whitespace is not stripped.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageNumber;
    ///
    /// assert_eq!(PageNumber::parse(Some("4")).get(), 4);
    /// assert_eq!(PageNumber::parse(Some("-2")), PageNumber::FIRST);
    /// assert_eq!(PageNumber::parse(Some("two")), PageNumber::FIRST);
    /// assert_eq!(PageNumber::parse(None), PageNumber::FIRST);
    /// ```
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse::<i64>().ok())
            .and_then(|value| u64::try_from(value).ok())
            .map_or(Self::FIRST, Self::new)
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Pagination metadata and row window for a single listing request.
///
/// Serialises in camelCase so views can consume it directly:
/// `page`, `totalPages`, `hasPrev`, `prevPage`, `hasNext`, `nextPage`.
/// The row window (`offset`, `limit`) is not serialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    page: u64,
    total_pages: u64,
    has_prev: bool,
    prev_page: u64,
    has_next: bool,
    next_page: u64,
    #[serde(skip)]
    offset: u64,
    #[serde(skip)]
    limit: u64,
}

impl Page {
    /// The effective 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Number of pages needed for the total row count; zero when empty.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.has_prev
    }

    /// Previous page number. Only meaningful when [`Page::has_prev`] holds.
    #[must_use]
    pub const fn prev_page(&self) -> u64 {
        self.prev_page
    }

    /// Whether a following page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Next page number. Only meaningful when [`Page::has_next`] holds.
    #[must_use]
    pub const fn next_page(&self) -> u64 {
        self.next_page
    }

    /// Rows to skip before the requested page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum rows on the requested page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}

/// Compute the page metadata for `requested` over `total_count` rows.
///
/// Pages past the end are accepted as-is; the caller simply receives an
/// empty slice for them.
///
/// # Examples
/// ```
/// use pagination::{DEFAULT_PAGE_SIZE, PageNumber, paginate};
///
/// let empty = paginate(0, PageNumber::new(5), DEFAULT_PAGE_SIZE);
/// assert_eq!(empty.total_pages(), 0);
/// assert_eq!(empty.page(), 5);
/// assert!(!empty.has_next());
/// ```
#[must_use]
pub const fn paginate(total_count: u64, requested: PageNumber, page_size: PageSize) -> Page {
    let page = requested.get();
    let size = page_size.get();
    let total_pages = total_count.div_ceil(size);

    Page {
        page,
        total_pages,
        has_prev: page > 1,
        prev_page: page - 1,
        has_next: page < total_pages,
        next_page: page.saturating_add(1),
        offset: (page - 1).saturating_mul(size),
        limit: size,
    }
}
