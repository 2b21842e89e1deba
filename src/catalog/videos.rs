//! Video listing and retrieval service.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use super::VideoCatalog;
use crate::api::{ApiClient, ApiError, Page, Pagination, Sort};
use crate::model::{Video, VideoStatus};

/// API endpoint for videos.
const ENDPOINT: &str = "/v1/videos";

/// Single-resource responses arrive wrapped in a `data` envelope.
#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Filters for [`Videos::list`].
///
/// Unset fields are omitted from the query string.
#[derive(Debug, Clone, Default)]
pub struct VideoListQuery {
    /// Page and page size.
    pub pagination: Pagination,
    /// Sort field and direction.
    pub sort: Option<Sort>,
    /// Restrict to a project.
    pub project_id: Option<String>,
    /// Restrict to a folder.
    pub folder_id: Option<String>,
    /// Title search query.
    pub search: Option<String>,
    /// Restrict to a processing status.
    pub status: Option<VideoStatus>,
}

impl VideoListQuery {
    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = self.pagination.query_params();

        if let Some(sort) = &self.sort {
            params.extend(sort.query_params());
        }
        if let Some(project_id) = &self.project_id {
            params.push(("project_id", project_id.clone()));
        }
        if let Some(folder_id) = &self.folder_id {
            params.push(("folder_id", folder_id.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("q", search.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }

        params
    }
}

/// Service for the `/v1/videos` endpoints.
///
/// # Example
///
/// ```no_run
/// use kinescope_client::{ApiClient, Credentials, Pagination, Videos};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let videos = Videos::new(ApiClient::new(Credentials::from_env()?));
///
/// let video = videos.get("video-uuid").await?;
/// println!("{} ({} assets)", video.title, video.assets.len());
///
/// let page = videos.list_by_folder("folder-uuid", Pagination::default()).await?;
/// for video in &page {
///     println!("{}", video.id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Videos {
    api: ApiClient,
}

impl Videos {
    /// Creates the service over an API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetches a single video by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] with [`StatusKind::NotFound`](crate::StatusKind)
    /// when the video does not exist, or other variants for transport and
    /// decoding failures.
    #[instrument(level = "debug", skip(self))]
    pub async fn get(&self, video_id: &str) -> Result<Video, ApiError> {
        let envelope: DataEnvelope<Video> = self
            .api
            .get_json(&format!("{ENDPOINT}/{video_id}"), &[])
            .await?;

        Ok(envelope.data)
    }

    /// Lists videos with the given filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on API failures.
    #[instrument(level = "debug", skip(self, query))]
    pub async fn list(&self, query: &VideoListQuery) -> Result<Page<Video>, ApiError> {
        self.api.get_json(ENDPOINT, &query.query_params()).await
    }

    /// Lists videos in a folder.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on API failures.
    pub async fn list_by_folder(
        &self,
        folder_id: &str,
        pagination: Pagination,
    ) -> Result<Page<Video>, ApiError> {
        self.list(&VideoListQuery {
            pagination,
            folder_id: Some(folder_id.to_string()),
            ..VideoListQuery::default()
        })
        .await
    }

    /// Lists videos in a project.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on API failures.
    pub async fn list_by_project(
        &self,
        project_id: &str,
        pagination: Pagination,
    ) -> Result<Page<Video>, ApiError> {
        self.list(&VideoListQuery {
            pagination,
            project_id: Some(project_id.to_string()),
            ..VideoListQuery::default()
        })
        .await
    }

    /// Searches videos by title.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on API failures.
    pub async fn search(
        &self,
        query: &str,
        pagination: Pagination,
    ) -> Result<Page<Video>, ApiError> {
        self.list(&VideoListQuery {
            pagination,
            search: Some(query.to_string()),
            ..VideoListQuery::default()
        })
        .await
    }
}

#[async_trait]
impl VideoCatalog for Videos {
    async fn get(&self, video_id: &str) -> Result<Video, ApiError> {
        Videos::get(self, video_id).await
    }

    async fn list_by_folder(
        &self,
        folder_id: &str,
        pagination: Pagination,
    ) -> Result<Page<Video>, ApiError> {
        Videos::list_by_folder(self, folder_id, pagination).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_default() {
        let query = VideoListQuery::default();
        let params = query.query_params();
        assert_eq!(
            params,
            vec![("page", "1".to_string()), ("per_page", "20".to_string())]
        );
    }

    #[test]
    fn test_query_params_skip_unset_filters() {
        let query = VideoListQuery {
            folder_id: Some("folder-1".to_string()),
            status: Some(VideoStatus::Done),
            ..VideoListQuery::default()
        };
        let params = query.query_params();

        assert!(params.contains(&("folder_id", "folder-1".to_string())));
        assert!(params.contains(&("status", "done".to_string())));
        assert!(!params.iter().any(|(key, _)| *key == "project_id"));
        assert!(!params.iter().any(|(key, _)| *key == "q"));
    }

    #[test]
    fn test_query_params_include_sort() {
        let query = VideoListQuery {
            sort: Some(Sort::desc("created_at")),
            ..VideoListQuery::default()
        };
        let params = query.query_params();

        assert!(params.contains(&("order", "created_at".to_string())));
        assert!(params.contains(&("direction", "desc".to_string())));
    }
}
