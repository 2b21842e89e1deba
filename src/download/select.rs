//! Quality-based asset selection.

use thiserror::Error;

use crate::model::Asset;

/// Strategy for choosing a quality variant from a video's assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityPreference {
    /// Select the highest available quality (maximum height).
    #[default]
    Best,
    /// Select the lowest available quality (minimum height).
    Worst,
}

impl QualityPreference {
    /// Human-readable name, used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::Worst => "worst",
        }
    }
}

/// No asset in the candidate list carries a download link.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no asset with a download link")]
pub struct NoDownloadableAsset;

/// Picks the asset to download from a video's quality variants.
///
/// Assets without a download link are never candidates. The remaining
/// assets are ordered by height (missing heights sort as 0) - descending
/// for [`QualityPreference::Best`], ascending for
/// [`QualityPreference::Worst`] - and ties keep their original relative
/// order. File-size validation is left to the caller.
///
/// # Errors
///
/// Returns [`NoDownloadableAsset`] when no asset has a download link.
pub fn select_asset(
    assets: &[Asset],
    preference: QualityPreference,
) -> Result<&Asset, NoDownloadableAsset> {
    let mut candidates: Vec<&Asset> = assets.iter().filter(|a| a.is_downloadable()).collect();

    if candidates.is_empty() {
        return Err(NoDownloadableAsset);
    }

    // sort_by is stable: equal heights keep their original order.
    match preference {
        QualityPreference::Best => {
            candidates.sort_by(|a, b| b.effective_height().cmp(&a.effective_height()));
        }
        QualityPreference::Worst => {
            candidates.sort_by(|a, b| a.effective_height().cmp(&b.effective_height()));
        }
    }

    Ok(candidates[0])
}
