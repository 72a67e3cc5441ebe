//! VisualFlickr Core - tag reliability and sentiment analysis for photo collections.
//!
//! VisualFlickr compares the tags people put on their photos with the labels
//! a visual classifier assigns, and scores both against a sentiment/emotion
//! ontology of adjective-noun pairs (e.g. MVSO).
//!
//! # Architecture
//!
//! ```text
//! Photo → Classifier labels ┐
//!                           ├→ Reconcile → Score (ontology) → Reliability → Aggregate
//! Photo → User tags ────────┘
//! ```
//!
//! The ontology store and the label vocabulary are loaded once and shared
//! read-only; everything below the analysis session is synchronous.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use visualflickr_core::{Analyzer, Config, JsonPhotoSource, PrecomputedClassifier};
//!
//! #[tokio::main]
//! async fn main() -> visualflickr_core::Result<()> {
//!     let config = Config::load()?;
//!     let source = JsonPhotoSource::load("photos.json".as_ref())?;
//!     let classifier =
//!         PrecomputedClassifier::load("labels.json".as_ref(), config.classifier.top_k)?;
//!     let analyzer = Analyzer::from_config(&config, Arc::new(classifier), Arc::new(source))?;
//!
//!     let analysis = analyzer.analyze_user_id("7488735@N03").await?;
//!     println!("{:?}", analysis.averages);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod aggregate;
pub mod analysis;
pub mod config;
pub mod error;
pub mod labels;
pub mod math;
pub mod ontology;
pub mod scoring;
pub mod types;

// Re-exports for convenient access
pub use aggregate::{accumulate, Accumulator};
pub use analysis::{
    load_vocabulary, Analyzer, Classifier, JsonPhotoSource, PhotoSource, PrecomputedClassifier,
};
pub use config::Config;
pub use error::{
    ConfigError, OntologyError, Result, ScoringError, ScoringResult, SourceError,
    VisualFlickrError,
};
pub use labels::LabelReconciler;
pub use ontology::OntologyStore;
pub use scoring::{ReconciledTags, ScoringEngine};
pub use types::{
    AnalysisDetails, AnalysisResult, AnalyzedPhoto, PhotoRecord, Scores, UserAggregate,
    UserAnalysis, UserTargets,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
