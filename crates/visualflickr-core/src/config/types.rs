//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Language variant used to pick ontology and classifier files
    pub language: String,

    /// Base directory for relative ontology, label and source file paths
    pub data_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: "english".to_string(),
            data_dir: PathBuf::from("~/.visualflickr"),
        }
    }
}

/// Ontology settings: one table pair per language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyConfig {
    /// Ontology kind reported alongside results
    pub name: String,

    /// Sentiment/emotion table locations keyed by language
    pub languages: BTreeMap<String, OntologyFiles>,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        let mut languages = BTreeMap::new();
        languages.insert("english".to_string(), OntologyFiles::default());
        Self {
            name: "MVSO".to_string(),
            languages,
        }
    }
}

/// Sentiment and emotion tables for a single language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologyFiles {
    /// Sentiment CSV path (supports ~)
    pub sentiment_csv: String,

    /// Emotion CSV path (supports ~)
    pub emotion_csv: String,

    /// Field names for a sentiment table without a header line.
    /// When absent the first line is read as the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_fields: Option<Vec<String>>,

    /// Field names for an emotion table without a header line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion_fields: Option<Vec<String>>,
}

impl Default for OntologyFiles {
    fn default() -> Self {
        Self {
            sentiment_csv: "mvso/sentiment/english.csv".to_string(),
            emotion_csv: "mvso/emotion/ANP_emotion_mapping_english.csv".to_string(),
            sentiment_fields: Some(vec!["ANP".to_string(), "sentiment".to_string()]),
            emotion_fields: None,
        }
    }
}

/// Classifier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Number of labels kept per image, most confident first
    pub top_k: usize,

    /// Label files keyed by language
    pub languages: BTreeMap<String, ClassifierFiles>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let mut languages = BTreeMap::new();
        languages.insert("english".to_string(), ClassifierFiles::default());
        Self {
            top_k: 5,
            languages,
        }
    }
}

/// Classifier label file for a single language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierFiles {
    /// Newline-delimited label list the model was trained on (supports ~)
    pub labels_file: String,
}

impl Default for ClassifierFiles {
    fn default() -> Self {
        Self {
            labels_file: "net/english/english_label.txt".to_string(),
        }
    }
}

/// Local photo source settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// JSON dump of users and their photos
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos_file: Option<String>,

    /// JSON map of photo id to precomputed classifier labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifications_file: Option<String>,
}

/// Analysis session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Photos analyzed concurrently when scoring a whole user
    pub parallel_workers: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 4,
        }
    }
}

/// Reliability scoring settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Maximum raw score, used as the 100% reference
    pub reliability_max: f64,

    /// Report reliability as a percentage instead of the raw [0, 1] score
    pub as_percentage: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            reliability_max: 1.0,
            as_percentage: true,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
