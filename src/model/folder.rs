//! Folder record for organizing videos within a project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A folder within a project.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Folder {
    /// Folder identifier (UUID).
    pub id: String,
    /// Parent project identifier.
    #[serde(default)]
    pub project_id: String,
    /// Folder name.
    #[serde(default)]
    pub name: String,
    /// Parent folder, for nested folders.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Number of videos in the folder.
    #[serde(default)]
    pub videos_count: u64,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Folder {
    /// Returns true for folders at the project root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns true when the folder holds no videos.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.videos_count == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_decodes() {
        let json = r#"{
            "id": "folder-1",
            "project_id": "project-1",
            "name": "Webinars",
            "videos_count": 12
        }"#;

        let folder: Folder = serde_json::from_str(json).unwrap();
        assert_eq!(folder.name, "Webinars");
        assert!(folder.is_root());
        assert!(!folder.is_empty());
    }

    #[test]
    fn test_nested_folder() {
        let json = r#"{"id": "folder-2", "parent_id": "folder-1"}"#;
        let folder: Folder = serde_json::from_str(json).unwrap();
        assert!(!folder.is_root());
        assert!(folder.is_empty());
    }
}
