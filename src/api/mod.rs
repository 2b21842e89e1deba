//! Core API plumbing: authenticated HTTP client, credentials, error
//! taxonomy, and pagination value objects.
//!
//! Higher-level services in [`crate::catalog`] compose these pieces; the
//! downloader in [`crate::download`] only sees their results.

mod client;
mod credentials;
mod error;
mod pagination;

pub use client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use credentials::{Credentials, CredentialsError, DEFAULT_ENV_VAR};
pub use error::{ApiError, StatusKind, parse_retry_after};
pub use pagination::{
    DEFAULT_PER_PAGE, MAX_PER_PAGE, MIN_PER_PAGE, Page, PageMeta, Pagination, PaginationError,
    Sort, SortDirection,
};
