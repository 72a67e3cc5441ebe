//! Sentiment, emotion and reliability scoring for a single photo.
//!
//! The engine decides which label set goes to the ontology: classifier tags
//! produce the image scores, reconciled user tags produce the tag scores.
//! The averaging itself lives in the ontology store.

pub mod reliability;

pub use reliability::{reliability_score, TagBreakdown};

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::ScoringConfig;
use crate::error::ScoringResult;
use crate::labels::{normalize_tag, LabelReconciler};
use crate::ontology::OntologyStore;
use crate::types::{AnalysisResult, Scores};

/// User tags after normalization, split by vocabulary membership.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciledTags {
    /// Every user tag in its normalized, reconciled spelling, in input order
    pub tags: Vec<String>,
    /// Tags that are vocabulary labels
    pub in_vocabulary: BTreeSet<String>,
    /// Tags outside the vocabulary
    pub out_of_vocabulary: BTreeSet<String>,
}

/// Scores photos against a shared ontology and vocabulary.
pub struct ScoringEngine {
    ontology: Arc<OntologyStore>,
    reconciler: Arc<LabelReconciler>,
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Create an engine over a loaded ontology and vocabulary.
    pub fn new(
        ontology: Arc<OntologyStore>,
        reconciler: Arc<LabelReconciler>,
        config: ScoringConfig,
    ) -> Self {
        Self {
            ontology,
            reconciler,
            config,
        }
    }

    pub fn ontology(&self) -> &OntologyStore {
        &self.ontology
    }

    pub fn reconciler(&self) -> &LabelReconciler {
        &self.reconciler
    }

    /// Average sentiment of `labels`.
    pub fn score_sentiment<I>(&self, labels: I) -> Option<Scores>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.ontology.average_sentiment(labels)
    }

    /// Average emotion of `labels`.
    pub fn score_emotion<I>(&self, labels: I) -> Option<Scores>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.ontology.average_emotion(labels)
    }

    /// Normalize raw user tags and split them against the vocabulary.
    pub fn reconcile<I>(&self, raw_tags: I) -> ReconciledTags
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut tags: Vec<String> = raw_tags
            .into_iter()
            .map(|tag| normalize_tag(tag.as_ref()))
            .filter(|tag| !tag.is_empty())
            .collect();
        self.reconciler.normalize_in_place(&mut tags);
        let (in_vocabulary, out_of_vocabulary) =
            self.reconciler.intersection_and_difference(&tags);

        ReconciledTags {
            tags,
            in_vocabulary,
            out_of_vocabulary,
        }
    }

    /// Reliability of reconciled user tags against the classifier output,
    /// reported as configured (percentage of `reliability_max`, or raw).
    pub fn score_tags<V>(&self, visual_tags: V, reconciled: &ReconciledTags) -> ScoringResult<f64>
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let breakdown = TagBreakdown::classify(
            visual_tags,
            &reconciled.in_vocabulary,
            &reconciled.out_of_vocabulary,
        );
        if self.config.as_percentage {
            breakdown.percent_of(self.config.reliability_max)
        } else {
            breakdown.raw_score()
        }
    }

    /// Score one photo from its classifier labels and raw user tags.
    ///
    /// A photo without any user tag gets no reliability score; the other
    /// fields are still filled in where labels are known.
    pub fn score_image(
        &self,
        visual_tags: &[String],
        raw_user_tags: &[String],
    ) -> (AnalysisResult, ReconciledTags) {
        let reconciled = self.reconcile(raw_user_tags);

        let tags_reliability = match self.score_tags(visual_tags, &reconciled) {
            Ok(score) => Some(score),
            Err(e) => {
                tracing::debug!("No reliability score: {e}");
                None
            }
        };

        let result = AnalysisResult {
            tags_sentiment: self.score_sentiment(&reconciled.in_vocabulary),
            tags_emotion: self.score_emotion(&reconciled.in_vocabulary),
            tags_reliability,
            image_sentiment: self.score_sentiment(visual_tags),
            image_emotion: self.score_emotion(visual_tags),
        };

        (result, reconciled)
    }
}
