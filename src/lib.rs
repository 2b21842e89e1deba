//! Kinescope API Client Library
//!
//! This library provides a typed client for the Kinescope video hosting
//! REST API: authenticated JSON endpoints, paginated listings, and a
//! streaming video downloader with progress events.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`api`] - Authenticated HTTP client, credentials, errors, pagination
//! - [`model`] - Typed records for videos, assets, and folders
//! - [`catalog`] - Video/folder listing services over the API client
//! - [`download`] - Streaming video downloader with lifecycle events
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use kinescope_client::{
//!     ApiClient, Credentials, EventKind, QualityPreference, VideoDownloader, Videos,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::from_env()?;
//! let videos = Videos::new(ApiClient::new(credentials));
//!
//! let mut downloader = VideoDownloader::new(Arc::new(videos));
//! downloader.on(EventKind::Progress, |event| println!("{event:?}"));
//!
//! let path = downloader
//!     .download_video("video-uuid", Path::new("./downloads"), QualityPreference::Best)
//!     .await?;
//! println!("Saved to: {}", path.display());
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod catalog;
pub mod download;
pub mod model;

// Re-export commonly used types
pub use api::{
    ApiClient, ApiError, Credentials, CredentialsError, Page, PageMeta, Pagination,
    PaginationError, Sort, SortDirection, StatusKind,
};
pub use catalog::{Folders, VideoCatalog, VideoListQuery, Videos};
pub use download::{
    DownloadError, DownloadEvent, EventBus, EventKind, QualityPreference, VideoDownloader,
    select_asset, write_stream,
};
pub use model::{Asset, Folder, Video, VideoStatus};
