//! Lifecycle events emitted during a video download.
//!
//! For one `download_video` call: a `Started` event once the asset is
//! chosen and validated, zero or more `Progress` events at 1 MiB
//! intervals, then exactly one of `Completed` or `Failed`. Errors raised
//! before the transfer is announced produce no events at all.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::error::DownloadError;
use super::select::QualityPreference;

/// Tag identifying an event type for listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Transfer announced, no bytes moved yet.
    Started,
    /// A 1 MiB progress boundary was crossed.
    Progress,
    /// Transfer finished and the file is on disk.
    Completed,
    /// Transfer failed after being announced.
    Failed,
}

/// A download was announced; emitted once before any bytes transfer.
#[derive(Debug, Clone)]
pub struct DownloadStarted {
    /// The video being downloaded.
    pub video_id: String,
    /// Asset URL the bytes will come from.
    pub download_url: String,
    /// Advertised asset size in bytes.
    pub size_bytes: u64,
    /// Quality strategy that chose the asset.
    pub quality: QualityPreference,
    /// Height of the chosen asset (0 when unknown).
    pub selected_height: u32,
    /// When the download began (UTC).
    pub occurred_at: DateTime<Utc>,
}

/// A progress boundary was crossed; at most one event per crossed 1 MiB.
#[derive(Debug, Clone)]
pub struct DownloadProgress {
    /// The video being downloaded.
    pub video_id: String,
    /// Destination file.
    pub file_path: PathBuf,
    /// Cumulative bytes written so far.
    pub bytes_written: u64,
    /// Advertised total size in bytes.
    pub size_bytes: u64,
    /// Completion percent (one decimal); `None` when the total is unknown.
    pub percent: Option<f64>,
    /// When the boundary was crossed (UTC).
    pub occurred_at: DateTime<Utc>,
}

/// A download finished; emitted exactly once on success.
#[derive(Debug, Clone)]
pub struct DownloadCompleted {
    /// The downloaded video.
    pub video_id: String,
    /// Destination file.
    pub file_path: PathBuf,
    /// Actual bytes on disk (bytes-written count when stat fails).
    pub file_size: u64,
    /// Wall-clock duration from start to completion.
    pub duration_ms: u64,
    /// When the download completed (UTC).
    pub occurred_at: DateTime<Utc>,
}

/// A download failed after being announced; emitted exactly once, right
/// before the causing error is returned to the caller.
#[derive(Debug)]
pub struct DownloadFailed {
    /// The video whose download failed.
    pub video_id: String,
    /// Destination file, which may hold partial data.
    pub file_path: Option<PathBuf>,
    /// Advertised total size in bytes.
    pub total_bytes: u64,
    /// Bytes written before the failure (0 when nothing was written).
    pub bytes_written: u64,
    /// The causing error, for listener inspection.
    pub error: DownloadError,
    /// When the failure occurred (UTC).
    pub occurred_at: DateTime<Utc>,
}

/// Any download lifecycle event, as delivered to listeners.
#[derive(Debug)]
pub enum DownloadEvent {
    /// See [`DownloadStarted`].
    Started(DownloadStarted),
    /// See [`DownloadProgress`].
    Progress(DownloadProgress),
    /// See [`DownloadCompleted`].
    Completed(DownloadCompleted),
    /// See [`DownloadFailed`].
    Failed(DownloadFailed),
}

impl DownloadEvent {
    /// The tag listeners register against.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Started(_) => EventKind::Started,
            Self::Progress(_) => EventKind::Progress,
            Self::Completed(_) => EventKind::Completed,
            Self::Failed(_) => EventKind::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let event = DownloadEvent::Started(DownloadStarted {
            video_id: "video-1".to_string(),
            download_url: "https://cdn.test/a.mp4".to_string(),
            size_bytes: 100,
            quality: QualityPreference::Best,
            selected_height: 1080,
            occurred_at: Utc::now(),
        });
        assert_eq!(event.kind(), EventKind::Started);

        let event = DownloadEvent::Failed(DownloadFailed {
            video_id: "video-1".to_string(),
            file_path: None,
            total_bytes: 100,
            bytes_written: 0,
            error: DownloadError::http_status("https://cdn.test/a.mp4", 500),
            occurred_at: Utc::now(),
        });
        assert_eq!(event.kind(), EventKind::Failed);
    }
}
