//! Visual classifier interface and a file-backed implementation.
//!
//! A classifier turns a photo into a short list of vocabulary labels, most
//! confident first. Running an image model is outside this crate; the
//! [`PrecomputedClassifier`] serves labels produced offline.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::SourceError;
use crate::types::PhotoRecord;

/// Trait that all visual classifiers implement.
///
/// Uses `async_trait` so the session can hold an `Arc<dyn Classifier>`.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classifier name for logging.
    fn name(&self) -> &str;

    /// Labels for a photo in descending confidence order.
    async fn classify(
        &self,
        photo_id: &str,
        record: &PhotoRecord,
    ) -> Result<Vec<String>, SourceError>;
}

/// Serves labels from a JSON file mapping photo ids to label lists.
///
/// ```json
/// { "433546289": ["old_buses", "lost_souls", "tiny_lights"] }
/// ```
#[derive(Debug, Clone)]
pub struct PrecomputedClassifier {
    labels: HashMap<String, Vec<String>>,
    top_k: usize,
    path: Option<PathBuf>,
}

impl PrecomputedClassifier {
    /// Load the label file, keeping at most `top_k` labels per photo.
    pub fn load(path: &Path, top_k: usize) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|e| SourceError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let labels: HashMap<String, Vec<String>> =
            serde_json::from_str(&content).map_err(|e| SourceError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        tracing::info!(
            "Loaded precomputed classifications for {} photos from {:?}",
            labels.len(),
            path
        );

        Ok(Self {
            labels,
            top_k,
            path: Some(path.to_path_buf()),
        })
    }

    /// Build from an in-memory map.
    pub fn from_map(labels: HashMap<String, Vec<String>>, top_k: usize) -> Self {
        Self {
            labels,
            top_k,
            path: None,
        }
    }

    /// Number of photos with labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[async_trait]
impl Classifier for PrecomputedClassifier {
    fn name(&self) -> &str {
        "precomputed"
    }

    async fn classify(
        &self,
        photo_id: &str,
        _record: &PhotoRecord,
    ) -> Result<Vec<String>, SourceError> {
        let labels = self
            .labels
            .get(photo_id)
            .ok_or_else(|| SourceError::Classification {
                photo_id: photo_id.to_string(),
                message: match &self.path {
                    Some(path) => format!("no labels in {}", path.display()),
                    None => "no labels".to_string(),
                },
            })?;

        Ok(labels.iter().take(self.top_k).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_classify_truncates_to_top_k() {
        let labels = HashMap::from([(
            "1".to_string(),
            vec!["a_b".to_string(), "c_d".to_string(), "e_f".to_string()],
        )]);
        let classifier = PrecomputedClassifier::from_map(labels, 2);
        let result = classifier.classify("1", &PhotoRecord::default()).await.unwrap();
        assert_eq!(result, vec!["a_b", "c_d"]);
    }

    #[tokio::test]
    async fn test_unknown_photo_is_classification_error() {
        let classifier = PrecomputedClassifier::from_map(HashMap::new(), 5);
        let err = classifier
            .classify("missing", &PhotoRecord::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SourceError::Classification { photo_id, .. } if photo_id == "missing"
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifications.json");
        std::fs::write(&path, r#"{"433546289": ["old_buses", "lost_souls"]}"#).unwrap();

        let classifier = PrecomputedClassifier::load(&path, 5).unwrap();
        assert_eq!(classifier.len(), 1);
        assert_eq!(classifier.name(), "precomputed");
        let labels = classifier
            .classify("433546289", &PhotoRecord::default())
            .await
            .unwrap();
        assert_eq!(labels, vec!["old_buses", "lost_souls"]);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifications.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            PrecomputedClassifier::load(&path, 5),
            Err(SourceError::Parse { .. })
        ));
    }
}
