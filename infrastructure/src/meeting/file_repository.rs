//! File system meeting repository
//!
//! This module provides [`FileMeetingRepository`], the
//! [`MeetingRepository`] adapter that reads recorded meetings stored as
//! `<meetings_dir>/<meeting_id>.json`.
//!
//! # Document shape
//!
//! Documents are parsed leniently by [`MeetingDocument`]:
//!
//! - top-level `raw_content` (or `content`) holds the meeting text
//! - the nested `metadata` object supplies `metadata.title`,
//!   `metadata.description`, `metadata.participants`, `metadata.start_time`,
//!   `metadata.end_time` and `metadata.summary` for the block shown to every
//!   agent
//!
//! Unknown fields are ignored, including metadata keys at the top level.
//!
//! # Example
//!
//! ```ignore
//! use roundtable_application::MeetingRepository;
//! use roundtable_infrastructure::FileMeetingRepository;
//!
//! let repo = FileMeetingRepository::new("./storage/meetings");
//! let context = repo.resolve("weekly-sync").await?;
//! println!("{}", context.metadata_summary);
//! ```

use async_trait::async_trait;
use roundtable_application::ports::meeting_repository::{MeetingLookupError, MeetingRepository};
use roundtable_domain::{MeetingContext, MeetingDocument};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Meeting repository backed by a directory of JSON documents.
#[derive(Debug, Clone)]
pub struct FileMeetingRepository {
    meetings_dir: PathBuf,
}

impl FileMeetingRepository {
    pub fn new(meetings_dir: impl Into<PathBuf>) -> Self {
        Self {
            meetings_dir: meetings_dir.into(),
        }
    }

    pub fn meetings_dir(&self) -> &Path {
        &self.meetings_dir
    }

    /// Path of the document for `meeting_id`, or `None` for ids that would
    /// escape the meetings directory.
    fn document_path(&self, meeting_id: &str) -> Option<PathBuf> {
        if meeting_id.is_empty()
            || meeting_id.contains('/')
            || meeting_id.contains('\\')
            || meeting_id.contains("..")
        {
            return None;
        }
        Some(self.meetings_dir.join(format!("{}.json", meeting_id)))
    }
}

#[async_trait]
impl MeetingRepository for FileMeetingRepository {
    async fn resolve(&self, meeting_id: &str) -> Result<MeetingContext, MeetingLookupError> {
        let Some(path) = self.document_path(meeting_id) else {
            warn!("Rejected meeting id {:?}", meeting_id);
            return Err(MeetingLookupError::NotFound(meeting_id.to_string()));
        };

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(MeetingLookupError::NotFound(meeting_id.to_string()));
            }
            Err(e) => {
                return Err(MeetingLookupError::Unavailable {
                    id: meeting_id.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        let document =
            MeetingDocument::from_json_str(&raw).map_err(|e| MeetingLookupError::Unavailable {
                id: meeting_id.to_string(),
                reason: format!("invalid meeting document: {}", e),
            })?;

        debug!(
            "Loaded meeting {} from {} ({} chars)",
            meeting_id,
            path.display(),
            document.content().len()
        );
        Ok(document.into_context())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn repo_with(files: &[(&str, &str)]) -> (tempfile::TempDir, FileMeetingRepository) {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in files {
            fs::write(dir.path().join(name), body).unwrap();
        }
        let repo = FileMeetingRepository::new(dir.path());
        (dir, repo)
    }

    #[tokio::test]
    async fn test_resolves_document_with_metadata() {
        let (_dir, repo) = repo_with(&[(
            "weekly.json",
            r#"{
                "metadata": {
                    "title": "Weekly sync",
                    "participants": ["Ana", "Bo"]
                },
                "raw_content": "We discussed the launch date."
            }"#,
        )]);

        let context = repo.resolve("weekly").await.unwrap();
        assert_eq!(context.content, "We discussed the launch date.");
        assert!(context.metadata_summary.contains("Title: Weekly sync"));
        assert!(context.metadata_summary.contains("Participants: Ana, Bo"));
    }

    #[tokio::test]
    async fn test_top_level_metadata_keys_are_ignored() {
        let (_dir, repo) = repo_with(&[(
            "flat.json",
            r#"{"title": "Flat title", "raw_content": "Notes"}"#,
        )]);

        let context = repo.resolve("flat").await.unwrap();
        assert_eq!(context.content, "Notes");
        assert!(!context.metadata_summary.contains("Flat title"));
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let (_dir, repo) = repo_with(&[]);
        let err = repo.resolve("absent").await.unwrap_err();
        assert!(matches!(err, MeetingLookupError::NotFound(id) if id == "absent"));
    }

    #[tokio::test]
    async fn test_path_escaping_ids_are_not_found() {
        let (dir, repo) = repo_with(&[]);
        fs::write(dir.path().join("..json"), "{}").unwrap();

        for id in ["../secret", "a/b", "a\\b", "..", ""] {
            assert!(
                matches!(
                    repo.resolve(id).await,
                    Err(MeetingLookupError::NotFound(_))
                ),
                "id {:?} should be rejected",
                id
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_document_is_unavailable() {
        let (_dir, repo) = repo_with(&[("broken.json", "{ not json")]);
        let err = repo.resolve("broken").await.unwrap_err();
        assert!(matches!(err, MeetingLookupError::Unavailable { id, .. } if id == "broken"));
    }

    #[tokio::test]
    async fn test_document_without_content_field_uses_whole_document() {
        let (_dir, repo) = repo_with(&[("bare.json", r#"{"notes": "ship it"}"#)]);
        let context = repo.resolve("bare").await.unwrap();
        assert!(context.content.contains("ship it"));
    }
}
