//! Pagination and sorting value objects for list endpoints.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Default number of items per page.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Minimum items per page.
pub const MIN_PER_PAGE: u32 = 1;

/// Maximum items per page accepted by the API.
pub const MAX_PER_PAGE: u32 = 100;

/// Error type for out-of-range pagination parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    /// Page numbers are 1-indexed.
    #[error("page must be at least 1, got {page}")]
    PageOutOfRange {
        /// The invalid page number.
        page: u32,
    },

    /// Per-page value outside the accepted range.
    #[error("per_page must be between {MIN_PER_PAGE} and {MAX_PER_PAGE}, got {per_page}")]
    PerPageOutOfRange {
        /// The invalid per-page value.
        per_page: u32,
    },
}

/// Pagination parameters for list requests.
///
/// Immutable: `next_page()` and the `with_*` methods return new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Creates pagination for the given page and page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError`] if `page` is 0 or `per_page` is outside
    /// `1..=100`.
    pub fn new(page: u32, per_page: u32) -> Result<Self, PaginationError> {
        if page < 1 {
            return Err(PaginationError::PageOutOfRange { page });
        }

        if !(MIN_PER_PAGE..=MAX_PER_PAGE).contains(&per_page) {
            return Err(PaginationError::PerPageOutOfRange { per_page });
        }

        Ok(Self { page, per_page })
    }

    /// Creates pagination for the first page with the given page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::PerPageOutOfRange`] if `per_page` is
    /// outside `1..=100`.
    pub fn first_page(per_page: u32) -> Result<Self, PaginationError> {
        Self::new(1, per_page)
    }

    /// Returns the 1-indexed page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the number of items per page.
    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Returns pagination for the following page.
    #[must_use]
    pub fn next_page(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }

    /// Returns pagination for a specific page, keeping the page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::PageOutOfRange`] if `page` is 0.
    pub fn with_page(self, page: u32) -> Result<Self, PaginationError> {
        Self::new(page, self.per_page)
    }

    /// Returns pagination with a different page size, keeping the page.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::PerPageOutOfRange`] if `per_page` is
    /// outside `1..=100`.
    pub fn with_per_page(self, per_page: u32) -> Result<Self, PaginationError> {
        Self::new(self.page, per_page)
    }

    /// Returns the item offset of this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Returns true for the first page.
    #[must_use]
    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }

    /// Query parameters for this pagination.
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

/// Sort direction for list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Wire value for query strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort field and direction for list requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    /// Field to sort by (e.g. `created_at`, `title`).
    pub field: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl Sort {
    /// Ascending sort on the given field.
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on the given field.
    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Returns the same field sorted in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            field: self.field.clone(),
            direction: self.direction.reversed(),
        }
    }

    /// Query parameters for this sort.
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("order", self.field.clone()),
            ("direction", self.direction.as_str().to_string()),
        ]
    }
}

/// Pagination metadata returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u64,
    /// Current page (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Last page number, when the API provides it.
    #[serde(default)]
    pub last_page: Option<u32>,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl PageMeta {
    /// Returns the last page number, computing it from `total` and
    /// `per_page` when the API did not provide one.
    #[must_use]
    pub fn last_page(&self) -> u32 {
        if let Some(last_page) = self.last_page {
            return last_page;
        }

        if self.per_page == 0 {
            return 1;
        }

        (self.total.div_ceil(u64::from(self.per_page)))
            .try_into()
            .unwrap_or(u32::MAX)
    }

    /// Returns true if pages remain after the current one.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page < self.last_page()
    }

    /// Returns true if the current page is not the first.
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// Returns true on the final page.
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.page >= self.last_page()
    }

    /// Returns true when the result set holds no items at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            last_page: None,
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    data: Vec<T>,
    #[serde(default)]
    meta: PageMeta,
}

impl<T> Page<T> {
    /// Creates a page from items and metadata.
    #[must_use]
    pub fn new(data: Vec<T>, meta: PageMeta) -> Self {
        Self { data, meta }
    }

    /// Items on this page.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the page, returning its items.
    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Pagination metadata.
    #[must_use]
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// First item on this page, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    /// Total number of items across all pages.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.meta.total
    }

    /// Returns true if pages remain after this one.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.meta.has_next_page()
    }

    /// Iterates over the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.per_page(), DEFAULT_PER_PAGE);
        assert!(pagination.is_first_page());
    }

    #[test]
    fn test_pagination_rejects_page_zero() {
        assert_eq!(
            Pagination::new(0, 20),
            Err(PaginationError::PageOutOfRange { page: 0 })
        );
    }

    #[test]
    fn test_pagination_rejects_per_page_out_of_range() {
        assert_eq!(
            Pagination::new(1, 0),
            Err(PaginationError::PerPageOutOfRange { per_page: 0 })
        );
        assert_eq!(
            Pagination::new(1, 101),
            Err(PaginationError::PerPageOutOfRange { per_page: 101 })
        );
        assert!(Pagination::new(1, 100).is_ok());
    }

    #[test]
    fn test_pagination_next_page_keeps_per_page() {
        let pagination = Pagination::new(2, 50).unwrap().next_page();
        assert_eq!(pagination.page(), 3);
        assert_eq!(pagination.per_page(), 50);
    }

    #[test]
    fn test_pagination_offset() {
        assert_eq!(Pagination::default().offset(), 0);
        assert_eq!(Pagination::new(3, 25).unwrap().offset(), 50);
    }

    #[test]
    fn test_pagination_query_params() {
        let params = Pagination::new(2, 50).unwrap().query_params();
        assert_eq!(
            params,
            vec![("page", "2".to_string()), ("per_page", "50".to_string())]
        );
    }

    #[test]
    fn test_sort_query_params() {
        let sort = Sort::desc("created_at");
        assert_eq!(
            sort.query_params(),
            vec![
                ("order", "created_at".to_string()),
                ("direction", "desc".to_string())
            ]
        );
    }

    #[test]
    fn test_sort_reversed() {
        let sort = Sort::asc("title").reversed();
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(sort.field, "title");
    }

    #[test]
    fn test_meta_computes_last_page() {
        let meta = PageMeta {
            total: 45,
            page: 1,
            per_page: 20,
            last_page: None,
        };
        assert_eq!(meta.last_page(), 3);
        assert!(meta.has_next_page());
    }

    #[test]
    fn test_meta_prefers_explicit_last_page() {
        let meta = PageMeta {
            total: 45,
            page: 1,
            per_page: 20,
            last_page: Some(5),
        };
        assert_eq!(meta.last_page(), 5);
    }

    #[test]
    fn test_meta_exact_division() {
        let meta = PageMeta {
            total: 40,
            page: 2,
            per_page: 20,
            last_page: None,
        };
        assert_eq!(meta.last_page(), 2);
        assert!(!meta.has_next_page());
        assert!(meta.is_last_page());
        assert!(meta.has_previous_page());
    }

    #[test]
    fn test_meta_empty_result() {
        let meta = PageMeta::default();
        assert!(meta.is_empty());
        assert!(!meta.has_next_page());
        assert_eq!(meta.last_page(), 0);
    }

    #[test]
    fn test_page_accessors() {
        let meta = PageMeta {
            total: 3,
            page: 1,
            per_page: 2,
            last_page: None,
        };
        let page = Page::new(vec!["a", "b"], meta);
        assert_eq!(page.len(), 2);
        assert!(!page.is_empty());
        assert_eq!(page.first(), Some(&"a"));
        assert_eq!(page.total(), 3);
        assert!(page.has_next_page());

        let collected: Vec<_> = page.into_iter().collect();
        assert_eq!(collected, vec!["a", "b"]);
    }

    #[test]
    fn test_page_deserializes_from_envelope() {
        let json = r#"{"data": ["x", "y"], "meta": {"total": 2, "page": 1, "per_page": 20}}"#;
        let page: Page<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.meta().total, 2);
        assert!(!page.has_next_page());
    }
}
