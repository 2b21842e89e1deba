//! Error types for the download module.
//!
//! Variants carry the context (video id, url, path) needed for user-facing
//! messages. Nothing is retried: every error is surfaced to the caller,
//! after a failure event when the transfer had already been announced.

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;

/// Errors that can occur while downloading a video.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The metadata fetch or folder listing failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No asset of the video carries a download link.
    #[error("no downloadable assets found for video \"{video_id}\"")]
    NoDownloadableAsset {
        /// The video whose assets were inspected.
        video_id: String,
    },

    /// The selected asset advertises a zero or missing file size.
    #[error("selected asset has invalid file size for video \"{video_id}\": {file_size}")]
    InvalidAssetSize {
        /// The video whose asset was selected.
        video_id: String,
        /// The advertised size.
        file_size: u64,
    },

    /// The asset download link is not a valid URL.
    #[error("invalid download URL: {url}")]
    InvalidUrl {
        /// The malformed URL string.
        url: String,
    },

    /// Network-level error while fetching asset bytes.
    #[error("transport error downloading {url}: {source}")]
    Transport {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The asset endpoint returned a non-success status.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while creating the destination or writing bytes.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        /// The file or directory path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates a transport error.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a file-write error.
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid-URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Returns true if the underlying API reported a missing resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_not_found())
    }
}

// No blanket `From<std::io::Error>` or `From<reqwest::Error>`: the variants
// need the url/path context that the source errors do not carry, so the
// helper constructors are the conversion points.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_downloadable_asset_display() {
        let error = DownloadError::NoDownloadableAsset {
            video_id: "video-1".to_string(),
        };
        let msg = error.to_string();
        assert!(
            msg.contains("no downloadable assets"),
            "unexpected message: {msg}"
        );
        assert!(msg.contains("video-1"), "expected video id in: {msg}");
    }

    #[test]
    fn test_invalid_asset_size_display() {
        let error = DownloadError::InvalidAssetSize {
            video_id: "video-1".to_string(),
            file_size: 0,
        };
        let msg = error.to_string();
        assert!(msg.contains("invalid file size"), "unexpected: {msg}");
        assert!(msg.contains('0'), "expected size in: {msg}");
    }

    #[test]
    fn test_http_status_display() {
        let error = DownloadError::http_status("https://cdn.test/a.mp4", 503);
        let msg = error.to_string();
        assert!(msg.contains("503"), "expected status in: {msg}");
        assert!(
            msg.contains("https://cdn.test/a.mp4"),
            "expected url in: {msg}"
        );
    }

    #[test]
    fn test_file_write_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = DownloadError::file_write("/tmp/video.mp4", io_error);
        assert!(error.to_string().contains("/tmp/video.mp4"));
    }

    #[test]
    fn test_api_error_passthrough_not_found() {
        let api = ApiError::from_response(404, String::new(), reqwest::header::HeaderMap::new());
        let error = DownloadError::from(api);
        assert!(error.is_not_found());
    }
}
