//! User-level averages over per-photo results.
//!
//! Every contribution is kept and summed in sorted order when the aggregate
//! is finished, so the result is bit-identical no matter what order photos
//! are added in or partial accumulators are merged in.
//!
//! Policy for missing data:
//! - an empty result set is `InsufficientData`
//! - a dimension no photo contributed to is left out of the aggregate
//! - reliability is `None` when no photo had a reliability score

use std::collections::BTreeMap;

use crate::error::{ScoringError, ScoringResult};
use crate::math::mean3;
use crate::types::{AnalysisResult, Scores, UserAggregate};

/// Values contributed to one dimension.
#[derive(Debug, Clone, Default, PartialEq)]
struct Contributions(Vec<f64>);

impl Contributions {
    fn push(&mut self, value: f64) {
        self.0.push(value);
    }

    fn merge(&mut self, other: Contributions) {
        self.0.extend(other.0);
    }

    /// Mean rounded to three decimals. The sum runs over sorted values since
    /// float addition is not associative.
    fn mean(&self) -> Option<f64> {
        let mut values = self.0.clone();
        values.sort_by(f64::total_cmp);
        mean3(values.iter().sum(), values.len())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct DimensionSums(BTreeMap<String, Contributions>);

impl DimensionSums {
    fn add(&mut self, scores: Option<&Scores>) {
        let Some(scores) = scores else {
            return;
        };
        for (dimension, value) in scores.iter() {
            self.0.entry(dimension.to_string()).or_default().push(value);
        }
    }

    fn merge(&mut self, other: DimensionSums) {
        for (dimension, contributions) in other.0 {
            self.0.entry(dimension).or_default().merge(contributions);
        }
    }

    fn means(&self) -> Scores {
        self.0
            .iter()
            .filter_map(|(dimension, contributions)| {
                contributions.mean().map(|mean| (dimension.clone(), mean))
            })
            .collect()
    }
}

/// Contributions to every numeric field of [`AnalysisResult`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator {
    images: usize,
    image_sentiment: DimensionSums,
    image_emotion: DimensionSums,
    tags_sentiment: DimensionSums,
    tags_emotion: DimensionSums,
    reliability: Contributions,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one photo's result in. Absent fields are skipped.
    pub fn add(&mut self, result: &AnalysisResult) {
        self.images += 1;
        self.image_sentiment.add(result.image_sentiment.as_ref());
        self.image_emotion.add(result.image_emotion.as_ref());
        self.tags_sentiment.add(result.tags_sentiment.as_ref());
        self.tags_emotion.add(result.tags_emotion.as_ref());
        if let Some(reliability) = result.tags_reliability {
            self.reliability.push(reliability);
        }
    }

    /// Combine with an accumulator built from other photos.
    pub fn merge(&mut self, other: Accumulator) {
        self.images += other.images;
        self.image_sentiment.merge(other.image_sentiment);
        self.image_emotion.merge(other.image_emotion);
        self.tags_sentiment.merge(other.tags_sentiment);
        self.tags_emotion.merge(other.tags_emotion);
        self.reliability.merge(other.reliability);
    }

    /// Number of results folded in so far.
    pub fn len(&self) -> usize {
        self.images
    }

    pub fn is_empty(&self) -> bool {
        self.images == 0
    }

    /// Per-dimension means, rounded to three decimals.
    pub fn finish(&self) -> ScoringResult<UserAggregate> {
        if self.images == 0 {
            return Err(ScoringError::InsufficientData(
                "no analysis results to aggregate".to_string(),
            ));
        }

        Ok(UserAggregate {
            user_id: None,
            user_name: None,
            images: self.images,
            image_sentiment: self.image_sentiment.means(),
            image_emotion: self.image_emotion.means(),
            tags_sentiment: self.tags_sentiment.means(),
            tags_emotion: self.tags_emotion.means(),
            tags_reliability: self.reliability.mean(),
        })
    }
}

impl<'a> Extend<&'a AnalysisResult> for Accumulator {
    fn extend<T: IntoIterator<Item = &'a AnalysisResult>>(&mut self, iter: T) {
        for result in iter {
            self.add(result);
        }
    }
}

impl<'a> FromIterator<&'a AnalysisResult> for Accumulator {
    fn from_iter<T: IntoIterator<Item = &'a AnalysisResult>>(iter: T) -> Self {
        let mut accumulator = Self::new();
        accumulator.extend(iter);
        accumulator
    }
}

/// Average a collection of per-photo results.
pub fn accumulate<'a, I>(results: I) -> ScoringResult<UserAggregate>
where
    I: IntoIterator<Item = &'a AnalysisResult>,
{
    results.into_iter().collect::<Accumulator>().finish()
}
