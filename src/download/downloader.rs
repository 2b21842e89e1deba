//! Video downloader orchestrating metadata fetch, asset selection, and
//! streaming writes, with lifecycle event notification.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures_util::StreamExt;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::bus::EventBus;
use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::DownloadError;
use super::events::{
    DownloadCompleted, DownloadEvent, DownloadFailed, DownloadProgress, DownloadStarted, EventKind,
};
use super::select::{QualityPreference, select_asset};
use super::writer::write_stream;
use crate::api::Pagination;
use crate::catalog::VideoCatalog;

/// Downloads video files through a [`VideoCatalog`], saving each video as
/// `{video_id}.mp4` in a destination directory.
///
/// Lifecycle events can be observed by registering listeners with
/// [`on`](Self::on); dispatch is synchronous and ordered, on the calling
/// task. There is no internal retry and no cleanup of partial files: a
/// failed transfer leaves whatever reached disk in place and surfaces the
/// causing error to the caller after the failure event.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use std::sync::Arc;
///
/// use kinescope_client::{
///     ApiClient, Credentials, DownloadEvent, EventKind, QualityPreference, VideoDownloader,
///     Videos,
/// };
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let videos = Videos::new(ApiClient::new(Credentials::from_env()?));
/// let mut downloader = VideoDownloader::new(Arc::new(videos));
///
/// downloader.on(EventKind::Progress, |event| {
///     if let DownloadEvent::Progress(progress) = event {
///         println!("{} bytes", progress.bytes_written);
///     }
/// });
///
/// let path = downloader
///     .download_video("video-uuid", Path::new("./downloads"), QualityPreference::Best)
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct VideoDownloader {
    catalog: Arc<dyn VideoCatalog>,
    http: reqwest::Client,
    events: EventBus,
}

impl VideoDownloader {
    /// Creates a downloader with default HTTP timeouts (30 s connect,
    /// 5 min read for large assets).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(catalog: Arc<dyn VideoCatalog>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client with static configuration");

        Self::with_http_client(catalog, http)
    }

    /// Creates a downloader over a caller-configured HTTP client.
    #[must_use]
    pub fn with_http_client(catalog: Arc<dyn VideoCatalog>, http: reqwest::Client) -> Self {
        Self {
            catalog,
            http,
            events: EventBus::new(),
        }
    }

    /// Registers an event listener at priority 0. Chainable.
    pub fn on(
        &mut self,
        kind: EventKind,
        listener: impl Fn(&DownloadEvent) + Send + Sync + 'static,
    ) -> &mut Self {
        self.events.on(kind, listener);
        self
    }

    /// Registers an event listener with an explicit priority (higher runs
    /// earlier). Chainable.
    pub fn on_with_priority(
        &mut self,
        kind: EventKind,
        listener: impl Fn(&DownloadEvent) + Send + Sync + 'static,
        priority: i32,
    ) -> &mut Self {
        self.events.on_with_priority(kind, listener, priority);
        self
    }

    /// Downloads a single video to `destination_dir/{video_id}.mp4`,
    /// creating the directory if needed, and returns the saved path.
    ///
    /// Emits `Started` once the asset is chosen and validated, `Progress`
    /// per crossed 1 MiB boundary, then exactly one of `Completed` or
    /// `Failed`. Errors raised before the asset is validated (unknown
    /// video, no downloadable asset, invalid file size, directory
    /// creation failure) propagate without any event.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`]; after a `Failed` event the returned
    /// error is the same one the event carried.
    #[instrument(skip(self, destination_dir), fields(destination_dir = %destination_dir.display()))]
    pub async fn download_video(
        &self,
        video_id: &str,
        destination_dir: &Path,
        quality: QualityPreference,
    ) -> Result<PathBuf, DownloadError> {
        let started_clock = Instant::now();
        let started_at = Utc::now();

        info!(quality = quality.as_str(), "starting video download");

        let video = self.catalog.get(video_id).await?;

        let asset =
            select_asset(&video.assets, quality).map_err(|_| DownloadError::NoDownloadableAsset {
                video_id: video_id.to_string(),
            })?;

        // The selector only returns downloadable assets.
        let Some(download_url) = asset.download_link.clone() else {
            return Err(DownloadError::NoDownloadableAsset {
                video_id: video_id.to_string(),
            });
        };
        let size_bytes = asset.file_size;
        let selected_height = asset.effective_height();

        if size_bytes == 0 {
            return Err(DownloadError::InvalidAssetSize {
                video_id: video_id.to_string(),
                file_size: size_bytes,
            });
        }

        info!(
            height = selected_height,
            file_size = size_bytes,
            url = %download_url,
            "selected asset for download"
        );

        tokio::fs::create_dir_all(destination_dir)
            .await
            .map_err(|e| DownloadError::file_write(destination_dir, e))?;

        let file_path = destination_dir.join(format!("{video_id}.mp4"));

        self.events.dispatch(&DownloadEvent::Started(DownloadStarted {
            video_id: video_id.to_string(),
            download_url: download_url.clone(),
            size_bytes,
            quality,
            selected_height,
            occurred_at: started_at,
        }));

        match self
            .transfer(video_id, &download_url, &file_path, size_bytes)
            .await
        {
            Ok(bytes_written) => {
                let duration_ms = elapsed_ms(started_clock);
                let file_size = tokio::fs::metadata(&file_path)
                    .await
                    .map(|meta| meta.len())
                    .unwrap_or(bytes_written);

                info!(
                    path = %file_path.display(),
                    file_size,
                    duration_ms,
                    "video download completed"
                );

                self.events
                    .dispatch(&DownloadEvent::Completed(DownloadCompleted {
                        video_id: video_id.to_string(),
                        file_path: file_path.clone(),
                        file_size,
                        duration_ms,
                        occurred_at: Utc::now(),
                    }));

                Ok(file_path)
            }
            Err((error, bytes_written)) => {
                warn!(error = %error, bytes_written, "video download failed");
                Err(self.emit_failed(video_id, file_path, size_bytes, bytes_written, error))
            }
        }
    }

    /// Downloads every video in a folder, paging through the listing in
    /// order, and returns the saved paths.
    ///
    /// The destination directory is created even when the folder is
    /// empty. The first failing video aborts the remaining pages and
    /// propagates its error.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] from the listing or from any single
    /// video's download.
    #[instrument(skip(self, destination_dir), fields(destination_dir = %destination_dir.display()))]
    pub async fn download_folder(
        &self,
        folder_id: &str,
        destination_dir: &Path,
        quality: QualityPreference,
    ) -> Result<Vec<PathBuf>, DownloadError> {
        info!(quality = quality.as_str(), "starting folder download");

        tokio::fs::create_dir_all(destination_dir)
            .await
            .map_err(|e| DownloadError::file_write(destination_dir, e))?;

        let mut paths = Vec::new();
        let mut pagination = Pagination::default();

        loop {
            let page = self.catalog.list_by_folder(folder_id, pagination).await?;
            let has_next = page.has_next_page();

            for video in &page {
                debug!(video_id = %video.id, index = paths.len() + 1, "downloading video from folder");
                paths.push(
                    self.download_video(&video.id, destination_dir, quality)
                        .await?,
                );
            }

            if !has_next {
                break;
            }
            pagination = pagination.next_page();
        }

        info!(total_videos = paths.len(), "folder download completed");

        Ok(paths)
    }

    /// Fetches the asset bytes and streams them to disk, emitting a
    /// progress event per crossed boundary. On failure, returns the error
    /// together with the bytes written before it.
    async fn transfer(
        &self,
        video_id: &str,
        download_url: &str,
        file_path: &Path,
        size_bytes: u64,
    ) -> Result<u64, (DownloadError, u64)> {
        let parsed =
            Url::parse(download_url).map_err(|_| (DownloadError::invalid_url(download_url), 0))?;

        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .map_err(|e| (DownloadError::transport(download_url, e), 0))?;

        let status = response.status();
        if !status.is_success() {
            return Err((
                DownloadError::http_status(download_url, status.as_u16()),
                0,
            ));
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| DownloadError::transport(download_url, e)));

        let on_progress = |bytes_written: u64, percent: Option<f64>| {
            self.events
                .dispatch(&DownloadEvent::Progress(DownloadProgress {
                    video_id: video_id.to_string(),
                    file_path: file_path.to_path_buf(),
                    bytes_written,
                    size_bytes,
                    percent,
                    occurred_at: Utc::now(),
                }));
        };

        write_stream(stream, file_path, size_bytes, on_progress)
            .await
            .map_err(|e| (e.source, e.bytes_written))
    }

    /// Dispatches the failure event and hands the causing error back for
    /// the caller to re-raise unchanged.
    fn emit_failed(
        &self,
        video_id: &str,
        file_path: PathBuf,
        total_bytes: u64,
        bytes_written: u64,
        error: DownloadError,
    ) -> DownloadError {
        let event = DownloadEvent::Failed(DownloadFailed {
            video_id: video_id.to_string(),
            file_path: Some(file_path),
            total_bytes,
            bytes_written,
            error,
            occurred_at: Utc::now(),
        });
        self.events.dispatch(&event);

        // Dispatch only borrows the event, so the Failed payload built
        // above still owns the error.
        let DownloadEvent::Failed(failed) = event else {
            unreachable!("event constructed as Failed above");
        };
        failed.error
    }
}

impl std::fmt::Debug for VideoDownloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoDownloader")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
