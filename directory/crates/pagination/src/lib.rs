//! Offset pagination primitives for the user directory listing.
//!
//! The listing view works on an in-memory, already filtered and sorted
//! collection. This crate owns the arithmetic for cutting that collection
//! into fixed-size pages:
//!
//! - [`PageSize`] and [`PageNumber`] are validated, non-zero newtypes.
//! - [`page_count`] reports how many pages a collection spans (`0` items
//!   produce `0` pages).
//! - [`page_slice`] borrows the items of one page, clamped to the available
//!   length, and [`Page`] packages an owned page with its metadata.
//!
//! Requesting a page beyond the end is not an error: it yields an empty
//! slice.
//!
//! # Example
//!
//! ```
//! use pagination::{DEFAULT_PAGE_SIZE, Page, PageNumber, page_count};
//!
//! let items: Vec<u32> = (1..=25).collect();
//! assert_eq!(page_count(items.len(), DEFAULT_PAGE_SIZE), 3);
//!
//! let third = PageNumber::new(3).expect("non-zero page");
//! let page = Page::from_items(items, third, DEFAULT_PAGE_SIZE);
//! assert_eq!(page.items(), &[21, 22, 23, 24, 25]);
//! assert_eq!(page.total_pages(), 3);
//! ```

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used by the directory listing.
pub const DEFAULT_PAGE_SIZE: PageSize = PageSize(NonZeroUsize::MIN.saturating_add(9));

/// Errors raised when constructing pagination values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// A page must hold at least one item.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    /// Page numbers are 1-based.
    #[error("page number must be greater than zero")]
    ZeroPageNumber,
}

/// Number of items shown per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Validate and construct a page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] when `size` is zero.
    pub const fn new(size: usize) -> Result<Self, PaginationError> {
        match NonZeroUsize::new(size) {
            Some(value) => Ok(Self(value)),
            None => Err(PaginationError::ZeroPageSize),
        }
    }

    /// Return the size as a plain integer.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        DEFAULT_PAGE_SIZE
    }
}

/// 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroUsize);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// Validate and construct a page number.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageNumber`] when `number` is zero.
    pub const fn new(number: usize) -> Result<Self, PaginationError> {
        match NonZeroUsize::new(number) {
            Some(value) => Ok(Self(value)),
            None => Err(PaginationError::ZeroPageNumber),
        }
    }

    /// Return the page number as a plain integer.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Whether this page exists in a collection spanning `total_pages`.
    #[must_use]
    pub const fn is_within(self, total_pages: usize) -> bool {
        self.get() <= total_pages
    }

    /// Offset of the first item on this page.
    ///
    /// Saturates instead of overflowing for absurdly large page numbers, which
    /// then simply select an empty slice.
    #[must_use]
    pub const fn offset(self, size: PageSize) -> usize {
        (self.get() - 1).saturating_mul(size.get())
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Number of pages needed for `total_items` items.
///
/// An empty collection spans zero pages.
///
/// # Examples
///
/// ```
/// use pagination::{DEFAULT_PAGE_SIZE, page_count};
///
/// assert_eq!(page_count(0, DEFAULT_PAGE_SIZE), 0);
/// assert_eq!(page_count(10, DEFAULT_PAGE_SIZE), 1);
/// assert_eq!(page_count(11, DEFAULT_PAGE_SIZE), 2);
/// ```
#[must_use]
pub const fn page_count(total_items: usize, size: PageSize) -> usize {
    total_items.div_ceil(size.get())
}

/// Borrow the items that belong to `page`.
///
/// The range `[(page - 1) * size, page * size)` is clamped to the slice, so a
/// page past the end yields an empty slice.
#[must_use]
pub fn page_slice<T>(items: &[T], page: PageNumber, size: PageSize) -> &[T] {
    let start = page.offset(size).min(items.len());
    let end = start.saturating_add(size.get()).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// One page of items together with the metadata needed to render controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    number: PageNumber,
    size: PageSize,
    total_items: usize,
    total_pages: usize,
}

impl<T> Page<T> {
    /// Cut `page` out of `items`, keeping the total counts of the input.
    #[must_use]
    pub fn from_items(items: Vec<T>, number: PageNumber, size: PageSize) -> Self {
        let total_items = items.len();
        let selected = items
            .into_iter()
            .skip(number.offset(size))
            .take(size.get())
            .collect();
        Self {
            items: selected,
            number,
            size,
            total_items,
            total_pages: page_count(total_items, size),
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The page number this page was cut for.
    #[must_use]
    pub const fn number(&self) -> PageNumber {
        self.number
    }

    /// The page size used to cut this page.
    #[must_use]
    pub const fn size(&self) -> PageSize {
        self.size
    }

    /// Number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages the input spans.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Whether a page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number.get() < self.total_pages
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number.get() > 1
    }
}
