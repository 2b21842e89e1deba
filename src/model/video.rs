//! Video record and processing status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::asset::Asset;

/// Processing status of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    /// Waiting to be processed.
    #[default]
    Pending,
    /// Upload in progress.
    Uploading,
    /// Transcoding in progress.
    Processing,
    /// Ready for playback.
    Done,
    /// Processing failed.
    Error,
    /// A status this client version does not know about.
    #[serde(other)]
    Unknown,
}

impl VideoStatus {
    /// Returns true when the video is ready for playback.
    #[must_use]
    pub fn is_ready(self) -> bool {
        self == Self::Done
    }

    /// Returns true while the video is uploading or transcoding.
    #[must_use]
    pub fn is_in_progress(self) -> bool {
        matches!(self, Self::Pending | Self::Uploading | Self::Processing)
    }

    /// Returns true when processing failed.
    #[must_use]
    pub fn has_error(self) -> bool {
        self == Self::Error
    }

    /// Wire value used in status filters.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Uploading => "uploading",
            Self::Processing => "processing",
            Self::Done => "done",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

/// A video with its quality variants.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Video {
    /// Video identifier (UUID).
    pub id: String,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Processing status.
    #[serde(default)]
    pub status: VideoStatus,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: u64,
    /// Parent project identifier.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Parent folder identifier.
    #[serde(default)]
    pub folder_id: Option<String>,
    /// HLS streaming URL.
    #[serde(default)]
    pub hls_link: Option<String>,
    /// Poster image URL.
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Available quality variants.
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Video {
    /// Returns true when the video is ready for playback.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status.is_ready()
    }

    /// Asset with the greatest height, ignoring download availability.
    #[must_use]
    pub fn highest_quality_asset(&self) -> Option<&Asset> {
        self.assets.iter().max_by_key(|asset| asset.effective_height())
    }

    /// Asset with the smallest height, ignoring download availability.
    #[must_use]
    pub fn lowest_quality_asset(&self) -> Option<&Asset> {
        self.assets.iter().min_by_key(|asset| asset.effective_height())
    }

    /// Duration formatted as `H:MM:SS` (or `M:SS` under an hour).
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        let hours = self.duration / 3600;
        let minutes = (self.duration % 3600) / 60;
        let seconds = self.duration % 60;

        if hours > 0 {
            format!("{hours}:{minutes:02}:{seconds:02}")
        } else {
            format!("{minutes}:{seconds:02}")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserializes_wire_values() {
        let status: VideoStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(status, VideoStatus::Done);
        assert!(status.is_ready());

        let status: VideoStatus = serde_json::from_str("\"processing\"").unwrap();
        assert!(status.is_in_progress());
    }

    #[test]
    fn test_unknown_status_does_not_fail_decoding() {
        let status: VideoStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, VideoStatus::Unknown);
        assert!(!status.is_ready());
    }

    #[test]
    fn test_video_decodes_with_nested_assets() {
        let json = r#"{
            "id": "video-1",
            "title": "Launch recording",
            "status": "done",
            "duration": 3723,
            "folder_id": "folder-9",
            "assets": [
                {"id": "a1", "height": 720, "file_size": 100},
                {"id": "a2", "height": 1080, "file_size": 200}
            ],
            "created_at": "2024-03-01T10:00:00Z"
        }"#;

        let video: Video = serde_json::from_str(json).unwrap();
        assert_eq!(video.id, "video-1");
        assert!(video.is_ready());
        assert_eq!(video.assets.len(), 2);
        assert_eq!(video.folder_id.as_deref(), Some("folder-9"));
    }

    #[test]
    fn test_quality_extremes() {
        let json = r#"{
            "id": "video-2",
            "assets": [
                {"id": "a1", "height": 480, "file_size": 10},
                {"id": "a2", "height": 1080, "file_size": 20},
                {"id": "a3", "file_size": 5}
            ]
        }"#;

        let video: Video = serde_json::from_str(json).unwrap();
        assert_eq!(video.highest_quality_asset().unwrap().id, "a2");
        assert_eq!(video.lowest_quality_asset().unwrap().id, "a3");
    }

    #[test]
    fn test_formatted_duration() {
        let mut video: Video = serde_json::from_str(r#"{"id": "v"}"#).unwrap();
        video.duration = 3723;
        assert_eq!(video.formatted_duration(), "1:02:03");
        video.duration = 125;
        assert_eq!(video.formatted_duration(), "2:05");
    }
}
