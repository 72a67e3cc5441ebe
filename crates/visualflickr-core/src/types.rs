//! Core data types for the VisualFlickr analysis pipeline.
//!
//! These types represent photo records coming from a source and the scores
//! produced by analyzing them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Named score dimensions mapped to values.
///
/// Keys are the dimension names of the table the scores came from, e.g.
/// `sentiment` or the emotion wheel (`joy`, `fear`, `anger`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scores(BTreeMap<String, f64>);

impl Scores {
    /// Create an empty score map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Value of a single dimension.
    pub fn get(&self, dimension: &str) -> Option<f64> {
        self.0.get(dimension).copied()
    }

    /// Set the value of a dimension.
    pub fn insert(&mut self, dimension: impl Into<String>, value: f64) {
        self.0.insert(dimension.into(), value);
    }

    /// Iterate dimensions in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of dimensions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no dimension is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The dimension with the highest value, if any.
    pub fn dominant(&self) -> Option<(&str, f64)> {
        self.iter()
            .fold(None, |best: Option<(&str, f64)>, (k, v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((k, v)),
            })
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Scores {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A photo as described by a photo source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Photo title
    #[serde(default)]
    pub title: String,

    /// Page URL of the photo on the sharing service
    #[serde(default)]
    pub link: String,

    /// Direct image URL (or local path) handed to the classifier
    #[serde(default)]
    pub download_link: String,

    /// Raw user tags, as typed by the owner
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Scores produced for a single photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Average sentiment of the user tags found in the vocabulary
    pub tags_sentiment: Option<Scores>,

    /// Average emotion of the user tags found in the vocabulary
    pub tags_emotion: Option<Scores>,

    /// Agreement between user tags and classifier tags
    pub tags_reliability: Option<f64>,

    /// Average sentiment of the classifier tags
    pub image_sentiment: Option<Scores>,

    /// Average emotion of the classifier tags
    pub image_emotion: Option<Scores>,
}

/// Inputs that produced an [`AnalysisResult`], kept for presentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    /// Photo title
    pub title: String,

    /// Image location the classifier was given
    pub file_path: String,

    /// User tags after normalization and reconciliation
    pub original_tags: Vec<String>,

    /// Classifier labels, most confident first
    pub visual_tags: Vec<String>,
}

/// A photo together with its scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedPhoto {
    /// Photo identifier at the source
    pub photo_id: String,

    /// Computed scores
    #[serde(flatten)]
    pub result: AnalysisResult,

    /// Inputs behind the scores
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<AnalysisDetails>,
}

/// Averages of every per-photo field across a user's collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAggregate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Number of results folded into the averages
    pub images: usize,

    pub image_sentiment: Scores,
    pub image_emotion: Scores,
    pub tags_sentiment: Scores,
    pub tags_emotion: Scores,

    /// Mean reliability; `None` when no photo had a reliability score
    pub tags_reliability: Option<f64>,
}

/// Full analysis of one user: per-photo scores plus the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAnalysis {
    pub user_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Per-photo results keyed by photo id
    pub photos: BTreeMap<String, AnalyzedPhoto>,

    /// Photos that could not be analyzed
    pub skipped: BTreeSet<String>,

    /// User-level averages; `None` when no photo was analyzed
    pub averages: Option<UserAggregate>,
}

/// Users to analyze in one batch, as read from a users file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserTargets {
    #[serde(default)]
    pub users_name: Vec<String>,

    #[serde(default)]
    pub users_id: Vec<String>,
}

impl UserTargets {
    /// Whether the file named no user at all.
    pub fn is_empty(&self) -> bool {
        self.users_name.is_empty() && self.users_id.is_empty()
    }
}
