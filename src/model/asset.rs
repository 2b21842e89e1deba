//! Video asset (quality variant) record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A specific encoded quality/resolution variant of a video.
///
/// Assets without a `download_link` can be played through the streaming
/// links on the parent video but cannot be fetched as a file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Asset {
    /// Asset identifier.
    pub id: String,
    /// Parent video identifier.
    #[serde(default)]
    pub video_id: String,
    /// Quality label (e.g. "1080p", "720p", "4k").
    #[serde(default)]
    pub quality: Option<String>,
    /// Width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
    /// Height in pixels.
    #[serde(default)]
    pub height: Option<u32>,
    /// Bitrate in bits per second.
    #[serde(default)]
    pub bitrate: Option<u64>,
    /// File size in bytes. The API reports 0 or omits it for assets that
    /// are still transcoding; consumers must treat such assets as not yet
    /// downloadable.
    #[serde(default)]
    pub file_size: u64,
    /// Video codec (e.g. "h264", "h265").
    #[serde(default)]
    pub codec: Option<String>,
    /// Direct playback URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Download URL, when the account has downloads enabled.
    #[serde(default)]
    pub download_link: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Asset {
    /// Height used for quality ordering: the advertised height, or 0 when
    /// the API omits it.
    #[must_use]
    pub fn effective_height(&self) -> u32 {
        self.height.unwrap_or(0)
    }

    /// Returns true if this asset carries a download URL.
    #[must_use]
    pub fn is_downloadable(&self) -> bool {
        self.download_link.is_some()
    }

    /// Resolution as "{width}x{height}", when both dimensions are known.
    #[must_use]
    pub fn resolution(&self) -> Option<String> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(format!("{width}x{height}")),
            _ => None,
        }
    }

    /// Returns true for 720p and above.
    #[must_use]
    pub fn is_hd(&self) -> bool {
        self.effective_height() >= 720
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn asset_json(height: Option<u32>, download_link: Option<&str>) -> String {
        let height = height.map_or("null".to_string(), |h| h.to_string());
        let link = download_link.map_or("null".to_string(), |l| format!("\"{l}\""));
        format!(
            r#"{{
                "id": "asset-1",
                "video_id": "video-1",
                "height": {height},
                "file_size": 1000,
                "download_link": {link}
            }}"#
        )
    }

    #[test]
    fn test_deserializes_full_asset() {
        let asset: Asset =
            serde_json::from_str(&asset_json(Some(1080), Some("https://cdn.test/a.mp4"))).unwrap();
        assert_eq!(asset.id, "asset-1");
        assert_eq!(asset.effective_height(), 1080);
        assert_eq!(asset.file_size, 1000);
        assert!(asset.is_downloadable());
    }

    #[test]
    fn test_missing_height_sorts_as_zero() {
        let asset: Asset = serde_json::from_str(&asset_json(None, None)).unwrap();
        assert_eq!(asset.effective_height(), 0);
        assert!(!asset.is_downloadable());
    }

    #[test]
    fn test_missing_file_size_defaults_to_zero() {
        let asset: Asset = serde_json::from_str(r#"{"id": "asset-2"}"#).unwrap();
        assert_eq!(asset.file_size, 0);
    }

    #[test]
    fn test_resolution() {
        let asset = Asset {
            width: Some(1920),
            height: Some(1080),
            ..serde_json::from_str::<Asset>(r#"{"id": "asset-3"}"#).unwrap()
        };
        assert_eq!(asset.resolution(), Some("1920x1080".to_string()));
        assert!(asset.is_hd());
    }

    #[test]
    fn test_is_hd_boundary() {
        let mut asset: Asset = serde_json::from_str(r#"{"id": "asset-4"}"#).unwrap();
        asset.height = Some(719);
        assert!(!asset.is_hd());
        asset.height = Some(720);
        assert!(asset.is_hd());
    }
}
