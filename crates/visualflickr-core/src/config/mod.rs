//! Configuration management for VisualFlickr.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Every section implements `Default`, so a partial file only
//! overrides the keys it names.

mod types;
mod validate;

pub use types::*;

use crate::error::{ConfigError, OntologyError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for VisualFlickr.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Ontology tables, per language
    pub ontology: OntologyConfig,

    /// Classifier label files, per language
    pub classifier: ClassifierConfig,

    /// Local photo source files
    pub source: SourceConfig,

    /// Analysis session settings
    pub analysis: AnalysisConfig,

    /// Reliability scoring settings
    pub scoring: ScoringConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.visualflickr.visualflickr/config.toml
    /// - Linux: ~/.config/visualflickr/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\visualflickr\config\config.toml
    ///
    /// Falls back to ~/.visualflickr/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "visualflickr", "visualflickr")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".visualflickr").join("config.toml")
            })
    }

    /// Resolve a configured path string (with ~ expansion).
    pub fn expand_path(raw: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(raw).into_owned())
    }

    /// Resolve a data file path: `~` is expanded and relative paths are
    /// taken from `general.data_dir`.
    pub fn data_path(&self, raw: &str) -> PathBuf {
        let path = Self::expand_path(raw);
        if path.is_absolute() {
            path
        } else {
            Self::expand_path(&self.general.data_dir.to_string_lossy()).join(path)
        }
    }

    /// Ontology table locations for a language.
    pub fn ontology_files(&self, language: &str) -> Result<&OntologyFiles, OntologyError> {
        self.ontology
            .languages
            .get(language)
            .ok_or_else(|| OntologyError::LanguageUnavailable {
                language: language.to_string(),
                available: join_keys(self.ontology.languages.keys()),
            })
    }

    /// Classifier label file for a language.
    pub fn classifier_files(&self, language: &str) -> Result<&ClassifierFiles, OntologyError> {
        self.classifier
            .languages
            .get(language)
            .ok_or_else(|| OntologyError::LanguageUnavailable {
                language: language.to_string(),
                available: join_keys(self.classifier.languages.keys()),
            })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn join_keys<'a>(keys: impl Iterator<Item = &'a String>) -> String {
    let keys: Vec<&str> = keys.map(String::as_str).collect();
    if keys.is_empty() {
        "none".to_string()
    } else {
        keys.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.language, "english");
        assert_eq!(config.analysis.parallel_workers, 4);
        assert_eq!(config.classifier.top_k, 5);
        assert_eq!(config.ontology.name, "MVSO");
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[ontology.languages.english]"));
        assert!(toml.contains("[scoring]"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scoring]
            as_percentage = false
            "#,
        )
        .unwrap();
        assert!(!config.scoring.as_percentage);
        assert_eq!(config.scoring.reliability_max, 1.0);
        assert!(config.ontology.languages.contains_key("english"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [general]
            language = "italian"

            [ontology.languages.italian]
            sentiment_csv = "/data/it_sentiment.csv"
            emotion_csv = "/data/it_emotion.csv"
            sentiment_fields = ["ANP", "sentiment"]
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.general.language, "italian");
        let files = config.ontology_files("italian").unwrap();
        assert_eq!(files.emotion_csv, "/data/it_emotion.csv");
        assert!(files.emotion_fields.is_none());
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analysis]\nparallel_workers = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("parallel_workers"));
    }

    #[test]
    fn test_missing_language_reports_available() {
        let config = Config::default();
        let err = config.ontology_files("klingon").unwrap_err();
        match err {
            OntologyError::LanguageUnavailable {
                language,
                available,
            } => {
                assert_eq!(language, "klingon");
                assert_eq!(available, "english");
            }
            other => panic!("Expected LanguageUnavailable, got {other:?}"),
        }
        assert!(config.classifier_files("klingon").is_err());
    }

    #[test]
    fn test_data_path_uses_data_dir_for_relative_paths() {
        let mut config = Config::default();
        config.general.data_dir = PathBuf::from("/srv/visualflickr");
        assert_eq!(
            config.data_path("mvso/sentiment/english.csv"),
            PathBuf::from("/srv/visualflickr/mvso/sentiment/english.csv")
        );
        assert_eq!(config.data_path("/data/labels.txt"), PathBuf::from("/data/labels.txt"));

        let files = config.ontology_files("english").unwrap();
        assert!(config.data_path(&files.emotion_csv).starts_with("/srv/visualflickr"));
    }

    #[test]
    fn test_expand_path_tilde() {
        let path = Config::expand_path("/absolute/path.csv");
        assert_eq!(path, PathBuf::from("/absolute/path.csv"));
        let home_relative = Config::expand_path("~/file.txt");
        assert!(!home_relative.to_string_lossy().starts_with('~'));
    }
}
