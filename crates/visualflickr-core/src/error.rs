//! Error types for the VisualFlickr analysis pipeline.
//!
//! Errors are organized by concern so each message carries the context
//! needed to act on it (file paths, languages, the data that was missing).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for VisualFlickr operations.
#[derive(Error, Debug)]
pub enum VisualFlickrError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Ontology and vocabulary loading errors
    #[error("Ontology error: {0}")]
    Ontology(#[from] OntologyError),

    /// Scoring and aggregation errors
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    /// Photo source and classifier errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while loading the ontology tables or a label vocabulary.
#[derive(Error, Debug)]
pub enum OntologyError {
    /// A table or label file could not be read
    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// A score table has no usable header or a malformed row
    #[error("Invalid table format in {source_name}: {message}")]
    Format {
        source_name: String,
        message: String,
    },

    /// The requested language has no entry in the settings
    #[error("Ontology not available for language '{language}' (available: {available})")]
    LanguageUnavailable { language: String, available: String },
}

/// Errors raised when there is nothing to score or average.
#[derive(Error, Debug, PartialEq)]
pub enum ScoringError {
    /// No data points were available for the requested computation
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

/// Errors raised by photo sources and classifiers.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source has no user matching the identifier or name
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Classifying a single photo failed
    #[error("Classification failed for photo {photo_id}: {message}")]
    Classification { photo_id: String, message: String },

    /// A backing file could not be read
    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// A backing file could not be parsed
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Convenience type alias for VisualFlickr results.
pub type Result<T> = std::result::Result<T, VisualFlickrError>;

/// Convenience type alias for scoring-specific results.
pub type ScoringResult<T> = std::result::Result<T, ScoringError>;
