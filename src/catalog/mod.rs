//! Listing services over the API client.
//!
//! [`Videos`] and [`Folders`] wrap the raw endpoints with typed results.
//! The [`VideoCatalog`] trait is the narrow capability the downloader
//! consumes, so tests and alternative backends can stand in for the HTTP
//! implementation.

mod folders;
mod videos;

pub use folders::Folders;
pub use videos::{VideoListQuery, Videos};

use async_trait::async_trait;

use crate::api::{ApiError, Page, Pagination};
use crate::model::Video;

/// Video lookup capability consumed by the downloader.
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    /// Fetches a single video by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] with a not-found status kind when the video
    /// does not exist.
    async fn get(&self, video_id: &str) -> Result<Video, ApiError>;

    /// Lists videos in a folder, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on API failures.
    async fn list_by_folder(
        &self,
        folder_id: &str,
        pagination: Pagination,
    ) -> Result<Page<Video>, ApiError>;
}
