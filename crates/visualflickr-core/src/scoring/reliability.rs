//! Tag reliability: agreement between user tags and classifier tags.
//!
//! User tags are split three ways against the classifier output:
//! - true positive: in the vocabulary and also produced by the classifier
//! - false positive: in the vocabulary but not produced by the classifier
//! - indefinable: outside the vocabulary, so the classifier cannot vouch for it
//!
//! The score is the weighted mean of the three counts.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{ScoringError, ScoringResult};
use crate::math::{percentage, round3};

/// Weight of a user tag confirmed by the classifier.
pub const TRUE_POSITIVE_WEIGHT: f64 = 1.0;

/// Weight of a vocabulary tag the classifier did not produce.
pub const FALSE_POSITIVE_WEIGHT: f64 = 0.5;

/// Weight of a tag outside the vocabulary.
pub const INDEFINABLE_WEIGHT: f64 = 0.8;

/// Counts of the three tag categories for one photo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagBreakdown {
    pub true_positive: usize,
    pub false_positive: usize,
    pub indefinable: usize,
}

impl TagBreakdown {
    /// Classify user tags against the classifier's visual tags.
    pub fn classify<V>(
        visual_tags: V,
        tags_in_vocabulary: &BTreeSet<String>,
        tags_out_of_vocabulary: &BTreeSet<String>,
    ) -> Self
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let visual: HashSet<String> = visual_tags
            .into_iter()
            .map(|tag| tag.as_ref().to_string())
            .collect();
        let true_positive = tags_in_vocabulary
            .iter()
            .filter(|tag| visual.contains(tag.as_str()))
            .count();

        Self {
            true_positive,
            false_positive: tags_in_vocabulary.len() - true_positive,
            indefinable: tags_out_of_vocabulary.len(),
        }
    }

    /// Total number of classified tags.
    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.indefinable
    }

    /// Weighted mean in [0, 1], rounded to three decimals.
    ///
    /// Fails with `InsufficientData` when there are no tags at all.
    pub fn raw_score(&self) -> ScoringResult<f64> {
        let total = self.total();
        if total == 0 {
            return Err(ScoringError::InsufficientData(
                "no tags to score reliability".to_string(),
            ));
        }
        let weighted = TRUE_POSITIVE_WEIGHT * self.true_positive as f64
            + FALSE_POSITIVE_WEIGHT * self.false_positive as f64
            + INDEFINABLE_WEIGHT * self.indefinable as f64;
        Ok(round3(weighted / total as f64))
    }

    /// Raw score as a percentage of `max` (one decimal).
    pub fn percent_of(&self, max: f64) -> ScoringResult<f64> {
        self.raw_score().map(|raw| percentage(raw, max))
    }
}

/// Reliability of a photo's user tags, as a percentage of `max`.
pub fn reliability_score<V>(
    visual_tags: V,
    tags_in_vocabulary: &BTreeSet<String>,
    tags_out_of_vocabulary: &BTreeSet<String>,
    max: f64,
) -> ScoringResult<f64>
where
    V: IntoIterator,
    V::Item: AsRef<str>,
{
    TagBreakdown::classify(visual_tags, tags_in_vocabulary, tags_out_of_vocabulary).percent_of(max)
}
