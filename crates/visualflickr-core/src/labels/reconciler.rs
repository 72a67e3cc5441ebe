//! Reconciliation of free-form tags against the controlled vocabulary.
//!
//! The vocabulary is the set of compound labels known to both the classifier
//! and the ontology. Each label is also indexed by its collapsed form so that
//! loosely written tags (`oldbuses`, `Old Buses`) map back to the canonical
//! label (`old_buses`).
//!
//! Reconciliation is permissive: tags that match nothing are passed through
//! or reported as out-of-vocabulary, never rejected.

use std::collections::{BTreeSet, HashMap, HashSet};

use rand::seq::IteratorRandom;
use rand::Rng;

use super::vocabulary::{collapse, split_label};

/// Immutable controlled vocabulary with collapsed-form lookup.
#[derive(Debug, Clone, Default)]
pub struct LabelReconciler {
    labels: BTreeSet<String>,
    collapsed: HashMap<String, String>,
    collisions: usize,
}

impl LabelReconciler {
    /// Build the vocabulary from the intersection of two label sources.
    ///
    /// When several labels collapse to the same form, the lexicographically
    /// smallest label owns that form and the others are reachable only by
    /// their exact spelling.
    pub fn build<A, B>(alpha: A, beta: B) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        let beta: HashSet<String> = beta
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();
        let labels: BTreeSet<String> = alpha
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .filter(|label| beta.contains(label))
            .collect();

        let mut collapsed = HashMap::with_capacity(labels.len());
        let mut collisions = 0;
        for label in &labels {
            let key = collapse(label);
            match collapsed.get(&key) {
                Some(owner) => {
                    collisions += 1;
                    tracing::debug!(
                        "Label {label:?} collapses to {key:?}, already owned by {owner:?}"
                    );
                }
                None => {
                    collapsed.insert(key, label.clone());
                }
            }
        }

        tracing::info!(
            "Built label vocabulary: {} labels ({} collapsed-form collisions)",
            labels.len(),
            collisions,
        );

        Self {
            labels,
            collapsed,
            collisions,
        }
    }

    /// Canonical vocabulary labels.
    pub fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    /// Canonical labels together with their collapsed forms.
    pub fn labels_with_collapsed(&self) -> BTreeSet<String> {
        self.labels
            .iter()
            .cloned()
            .chain(self.collapsed.keys().cloned())
            .collect()
    }

    /// Number of canonical labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of labels that lost their collapsed form to another label.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Exact canonical membership.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Whether any of `tags` is a canonical label.
    pub fn contains_any<I>(&self, tags: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        tags.into_iter().any(|tag| self.contains(tag.as_ref()))
    }

    /// Tags that are canonical labels (exact match only).
    pub fn intersection<I>(&self, tags: I) -> BTreeSet<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        tags.into_iter()
            .map(|tag| tag.as_ref().to_string())
            .filter(|tag| self.contains(tag))
            .collect()
    }

    /// Split tags into `(in_vocabulary, out_of_vocabulary)` by exact match.
    pub fn intersection_and_difference<I>(&self, tags: I) -> (BTreeSet<String>, BTreeSet<String>)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        tags.into_iter()
            .map(|tag| tag.as_ref().to_string())
            .partition(|tag| self.contains(tag))
    }

    /// Replace, position by position, every tag whose collapsed form belongs
    /// to a vocabulary label with that canonical label.
    ///
    /// Canonical labels and unmatched tags are left as they are, so applying
    /// this twice gives the same result as applying it once.
    pub fn normalize_in_place(&self, tags: &mut [String]) {
        for tag in tags.iter_mut() {
            if self.contains(tag) {
                continue;
            }
            if let Some(canonical) = self.collapsed.get(&collapse(tag)) {
                tracing::trace!("Reconciled tag {tag:?} -> {canonical:?}");
                tag.clone_from(canonical);
            }
        }
    }

    /// The canonical label for `label`, if it is one or collapses to one.
    pub fn check_availability(&self, label: &str) -> Option<&str> {
        if let Some(canonical) = self.labels.get(label) {
            return Some(canonical.as_str());
        }
        self.collapsed.get(&collapse(label)).map(String::as_str)
    }

    /// A uniformly random vocabulary label, for user-facing hints.
    pub fn sample(&self) -> Option<&str> {
        self.sample_with(&mut rand::thread_rng())
    }

    /// [`sample`](Self::sample) with a caller-provided generator.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.labels.iter().choose(rng).map(String::as_str)
    }

    /// Adjective halves of the vocabulary labels.
    pub fn adjectives(&self) -> BTreeSet<&str> {
        self.labels
            .iter()
            .filter_map(|label| split_label(label).map(|(adjective, _)| adjective))
            .collect()
    }

    /// Noun halves of the vocabulary labels.
    pub fn nouns(&self) -> BTreeSet<&str> {
        self.labels
            .iter()
            .filter_map(|label| split_label(label).map(|(_, noun)| noun))
            .collect()
    }
}
