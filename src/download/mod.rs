//! Streaming video downloader with lifecycle events.
//!
//! This module turns a video id into an `.mp4` on disk: it fetches the
//! video's metadata through a [`VideoCatalog`](crate::catalog::VideoCatalog),
//! picks a quality variant, streams the asset to the destination directory,
//! and notifies registered listeners of progress and outcome.
//!
//! # Features
//!
//! - Streaming transfers (memory-efficient for large assets)
//! - Best/worst quality selection over a video's assets
//! - Progress events at 1 MiB intervals, synchronous and ordered
//! - Structured error types with full context
//! - Folder-level bulk downloads across paginated listings
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use kinescope_client::{
//!     ApiClient, Credentials, QualityPreference, VideoDownloader, Videos,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let videos = Videos::new(ApiClient::new(Credentials::from_env()?));
//! let downloader = VideoDownloader::new(Arc::new(videos));
//!
//! let paths = downloader
//!     .download_folder("folder-uuid", Path::new("./downloads"), QualityPreference::Best)
//!     .await?;
//! println!("Downloaded {} videos", paths.len());
//! # Ok(())
//! # }
//! ```

mod bus;
mod constants;
mod downloader;
mod error;
mod events;
mod select;
mod writer;

pub use bus::{EventBus, Listener};
pub use constants::{PROGRESS_INTERVAL_BYTES, WRITE_BUFFER_BYTES};
pub use downloader::VideoDownloader;
pub use error::DownloadError;
pub use events::{
    DownloadCompleted, DownloadEvent, DownloadFailed, DownloadProgress, DownloadStarted, EventKind,
};
pub use select::{NoDownloadableAsset, QualityPreference, select_asset};
pub use writer::{StreamWriteError, write_stream};
