//! Folder listing and retrieval service.

use serde::Deserialize;
use tracing::instrument;

use crate::api::{ApiClient, ApiError, Page, Pagination, Sort};
use crate::model::Folder;

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Service for the `/v1/projects/{project_id}/folders` endpoints.
#[derive(Debug, Clone)]
pub struct Folders {
    api: ApiClient,
}

impl Folders {
    /// Creates the service over an API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Lists folders within a project, optionally restricted to the
    /// children of `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on API failures, including
    /// [`StatusKind::NotFound`](crate::StatusKind) for an unknown project.
    #[instrument(level = "debug", skip(self, pagination, sort))]
    pub async fn list(
        &self,
        project_id: &str,
        pagination: Pagination,
        parent_id: Option<&str>,
        sort: Option<&Sort>,
    ) -> Result<Page<Folder>, ApiError> {
        let mut params = pagination.query_params();
        if let Some(sort) = sort {
            params.extend(sort.query_params());
        }
        if let Some(parent_id) = parent_id {
            params.push(("parent_id", parent_id.to_string()));
        }

        self.api
            .get_json(&format!("/v1/projects/{project_id}/folders"), &params)
            .await
    }

    /// Fetches a single folder by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on API failures.
    #[instrument(level = "debug", skip(self))]
    pub async fn get(&self, project_id: &str, folder_id: &str) -> Result<Folder, ApiError> {
        let envelope: DataEnvelope<Folder> = self
            .api
            .get_json(
                &format!("/v1/projects/{project_id}/folders/{folder_id}"),
                &[],
            )
            .await?;

        Ok(envelope.data)
    }
}
