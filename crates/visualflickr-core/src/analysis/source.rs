//! Photo source interface and a JSON-file implementation.
//!
//! A source lists a user's photos, resolves user names and ids, and searches
//! photos by tag. The [`JsonPhotoSource`] serves an exported collection:
//!
//! ```json
//! {
//!   "users": {
//!     "7488735@N03": {
//!       "name": "alice",
//!       "photos": {
//!         "433546289": { "title": "...", "download_link": "...", "tags": ["old buses"] }
//!       }
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use serde::Deserialize;

use crate::error::SourceError;
use crate::labels::collapse;
use crate::types::PhotoRecord;

/// Photos of one user keyed by photo id.
pub type PhotoSet = BTreeMap<String, PhotoRecord>;

/// Trait that all photo sources implement.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    /// Every photo of a user.
    async fn photos_for_user(&self, user_id: &str) -> Result<PhotoSet, SourceError>;

    /// Resolve a user name to its id.
    async fn user_id_for_name(&self, name: &str) -> Result<String, SourceError>;

    /// Display name of a user id, if the source knows one.
    async fn user_name_for_id(&self, user_id: &str) -> Result<Option<String>, SourceError>;

    /// Photos carrying every one of `tags`, pulled lazily.
    ///
    /// `tags` and photo tags are compared in collapsed form, the same way
    /// the vocabulary looks labels up. An empty tag list matches nothing.
    fn photos_for_tags(
        &self,
        tags: Vec<String>,
    ) -> BoxStream<'_, Result<(String, PhotoRecord), SourceError>>;
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Catalog {
    #[serde(default)]
    users: BTreeMap<String, UserEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct UserEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    photos: PhotoSet,
}

/// Photo source backed by an exported JSON collection.
#[derive(Debug, Clone, Default)]
pub struct JsonPhotoSource {
    catalog: Catalog,
}

impl JsonPhotoSource {
    /// Load a collection file.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|e| SourceError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let source = Self::parse(&content).map_err(|e| SourceError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::info!(
            "Loaded {} users with {} photos from {:?}",
            source.catalog.users.len(),
            source.photo_count(),
            path
        );

        Ok(source)
    }

    /// Parse collection content (see the module docs for the layout).
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            catalog: serde_json::from_str(content)?,
        })
    }

    /// Total number of photos across users.
    pub fn photo_count(&self) -> usize {
        self.catalog.users.values().map(|u| u.photos.len()).sum()
    }

    fn user(&self, user_id: &str) -> Result<&UserEntry, SourceError> {
        self.catalog
            .users
            .get(user_id)
            .ok_or_else(|| SourceError::UserNotFound(user_id.to_string()))
    }
}

fn has_all_tags(record: &PhotoRecord, tags: &[String]) -> bool {
    let collapsed: Vec<String> = record.tags.iter().map(|t| collapse(t)).collect();
    tags.iter().all(|tag| collapsed.contains(&collapse(tag)))
}

#[async_trait]
impl PhotoSource for JsonPhotoSource {
    fn name(&self) -> &str {
        "json"
    }

    async fn photos_for_user(&self, user_id: &str) -> Result<PhotoSet, SourceError> {
        Ok(self.user(user_id)?.photos.clone())
    }

    async fn user_id_for_name(&self, name: &str) -> Result<String, SourceError> {
        self.catalog
            .users
            .iter()
            .find(|(_, user)| user.name.as_deref() == Some(name))
            .map(|(id, _)| id.clone())
            .ok_or_else(|| SourceError::UserNotFound(name.to_string()))
    }

    async fn user_name_for_id(&self, user_id: &str) -> Result<Option<String>, SourceError> {
        Ok(self.user(user_id)?.name.clone())
    }

    fn photos_for_tags(
        &self,
        tags: Vec<String>,
    ) -> BoxStream<'_, Result<(String, PhotoRecord), SourceError>> {
        if tags.is_empty() {
            return stream::empty().boxed();
        }

        let matches = self
            .catalog
            .users
            .values()
            .flat_map(|user| user.photos.iter())
            .filter(move |(_, record)| has_all_tags(record, &tags))
            .map(|(id, record)| Ok::<_, SourceError>((id.clone(), record.clone())));

        stream::iter(matches).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = r#"{
        "users": {
            "7488735@N03": {
                "name": "alice",
                "photos": {
                    "1": { "title": "Depot", "tags": ["Old Buses", "night"] },
                    "2": { "title": "Choir", "tags": ["sacred music"] }
                }
            },
            "1234@N01": {
                "photos": {
                    "3": { "tags": ["old_buses", "Night", "rain"] }
                }
            }
        }
    }"#;

    fn source() -> JsonPhotoSource {
        JsonPhotoSource::parse(COLLECTION).unwrap()
    }

    #[tokio::test]
    async fn test_photos_for_user() {
        let photos = source().photos_for_user("7488735@N03").await.unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos["1"].title, "Depot");
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let err = source().photos_for_user("nobody").await.unwrap_err();
        assert!(matches!(err, SourceError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_name_resolution() {
        let source = source();
        assert_eq!(source.user_id_for_name("alice").await.unwrap(), "7488735@N03");
        assert!(source.user_id_for_name("bob").await.is_err());
        assert_eq!(
            source.user_name_for_id("7488735@N03").await.unwrap().as_deref(),
            Some("alice")
        );
        assert_eq!(source.user_name_for_id("1234@N01").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_tag_search_requires_all_tags() {
        let source = source();
        let found: Vec<_> = source
            .photos_for_tags(vec!["old_buses".to_string(), "night".to_string()])
            .collect()
            .await;
        let ids: Vec<String> = found.into_iter().map(|r| r.unwrap().0).collect();
        assert_eq!(ids, vec!["3", "1"]);

        let none: Vec<_> = source
            .photos_for_tags(vec!["old_buses".to_string(), "sacred_music".to_string()])
            .collect()
            .await;
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_tag_search_matches_collapsed_forms() {
        let source = JsonPhotoSource::parse(
            r#"{"users": {"1": {"photos": {"9": {"tags": ["sacredmusic", "OldBuses"]}}}}}"#,
        )
        .unwrap();
        let found: Vec<_> = source
            .photos_for_tags(vec!["sacred_music".to_string()])
            .collect()
            .await;
        assert_eq!(found.len(), 1);

        let found: Vec<_> = source
            .photos_for_tags(vec!["old buses".to_string()])
            .collect()
            .await;
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_tag_search_without_tags_is_empty() {
        let found: Vec<_> = source().photos_for_tags(Vec::new()).collect().await;
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_tag_search_stops_when_dropped() {
        let source = source();
        let first: Vec<_> = source
            .photos_for_tags(vec!["old_buses".to_string()])
            .take(1)
            .collect()
            .await;
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photos.json");
        std::fs::write(&path, COLLECTION).unwrap();
        let source = JsonPhotoSource::load(&path).unwrap();
        assert_eq!(source.photo_count(), 3);

        assert!(matches!(
            JsonPhotoSource::load(&dir.path().join("missing.json")),
            Err(SourceError::Read { .. })
        ));
    }
}
