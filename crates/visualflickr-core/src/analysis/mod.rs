//! Analysis sessions over a photo source and a classifier.
//!
//! An [`Analyzer`] owns the loaded ontology and vocabulary and scores photos
//! pulled from a [`PhotoSource`], using a [`Classifier`] for the visual
//! labels. Per-user photo analysis runs with bounded concurrency; a photo
//! that fails is logged and skipped without failing the user.

pub mod classifier;
pub mod source;

pub use classifier::{Classifier, PrecomputedClassifier};
pub use source::{JsonPhotoSource, PhotoSet, PhotoSource};

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use futures_util::stream::{self, BoxStream, StreamExt};

use crate::aggregate::Accumulator;
use crate::config::{AnalysisConfig, Config};
use crate::error::{Result, SourceError};
use crate::labels::{load_labels, LabelReconciler};
use crate::ontology::OntologyStore;
use crate::scoring::ScoringEngine;
use crate::types::{AnalysisDetails, AnalyzedPhoto, PhotoRecord, UserAnalysis, UserTargets};

/// Load the ontology and vocabulary configured for `language`.
///
/// The vocabulary is the intersection of the classifier label file and the
/// labels with both a sentiment and an emotion record.
pub fn load_vocabulary(
    config: &Config,
    language: &str,
) -> Result<(OntologyStore, LabelReconciler)> {
    let store = OntologyStore::from_config(config, language)?;
    let classifier_files = config.classifier_files(language)?;
    let classifier_labels = load_labels(&config.data_path(&classifier_files.labels_file))?;
    let reconciler = LabelReconciler::build(classifier_labels, store.labels());
    Ok((store, reconciler))
}

/// A read-only analysis session.
pub struct Analyzer {
    engine: ScoringEngine,
    classifier: Arc<dyn Classifier>,
    source: Arc<dyn PhotoSource>,
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create a session over an already loaded ontology and vocabulary.
    pub fn new(
        store: OntologyStore,
        reconciler: LabelReconciler,
        classifier: Arc<dyn Classifier>,
        source: Arc<dyn PhotoSource>,
        config: &Config,
    ) -> Self {
        tracing::debug!(
            "Analysis session: {} {} ontology, classifier {}, source {}",
            store.name(),
            store.language(),
            classifier.name(),
            source.name(),
        );

        Self {
            engine: ScoringEngine::new(
                Arc::new(store),
                Arc::new(reconciler),
                config.scoring.clone(),
            ),
            classifier,
            source,
            config: config.analysis.clone(),
        }
    }

    /// Load the tables for the configured language and create a session.
    pub fn from_config(
        config: &Config,
        classifier: Arc<dyn Classifier>,
        source: Arc<dyn PhotoSource>,
    ) -> Result<Self> {
        let (store, reconciler) = load_vocabulary(config, &config.general.language)?;
        Ok(Self::new(store, reconciler, classifier, source, config))
    }

    /// The scoring engine behind this session.
    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// A random vocabulary label to suggest as a search tag.
    pub fn label_hint(&self) -> Option<&str> {
        self.engine.reconciler().sample()
    }

    /// The canonical label for a tag, if the vocabulary knows it.
    pub fn check_availability(&self, tag: &str) -> Option<&str> {
        self.engine.reconciler().check_availability(tag)
    }

    /// Classify and score a single photo.
    pub async fn analyze_photo(
        &self,
        photo_id: &str,
        record: &PhotoRecord,
    ) -> std::result::Result<AnalyzedPhoto, SourceError> {
        let visual_tags = self.classifier.classify(photo_id, record).await?;
        let (result, reconciled) = self.engine.score_image(&visual_tags, &record.tags);

        tracing::debug!(
            "Photo {photo_id}: {} visual tags, {} user tags ({} in vocabulary)",
            visual_tags.len(),
            reconciled.tags.len(),
            reconciled.in_vocabulary.len(),
        );

        Ok(AnalyzedPhoto {
            photo_id: photo_id.to_string(),
            result,
            details: Some(AnalysisDetails {
                title: record.title.clone(),
                file_path: record.download_link.clone(),
                original_tags: reconciled.tags,
                visual_tags,
            }),
        })
    }

    /// Analyze every photo of a user.
    pub async fn analyze_user_id(
        &self,
        user_id: &str,
    ) -> std::result::Result<UserAnalysis, SourceError> {
        let photos = self.source.photos_for_user(user_id).await?;
        let user_name = match self.source.user_name_for_id(user_id).await {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!("No name for user {user_id}: {e}");
                None
            }
        };
        Ok(self.analyze_collection(user_id, user_name, photos).await)
    }

    /// Resolve a user name and analyze every photo of that user.
    pub async fn analyze_user_name(
        &self,
        name: &str,
    ) -> std::result::Result<UserAnalysis, SourceError> {
        let user_id = self.source.user_id_for_name(name).await?;
        let photos = self.source.photos_for_user(&user_id).await?;
        Ok(self
            .analyze_collection(&user_id, Some(name.to_string()), photos)
            .await)
    }

    /// Analyze a batch of users, keyed by user id.
    ///
    /// Users named in `users_name` are resolved first. A user that cannot be
    /// found or listed is logged and left out.
    pub async fn analyze_users(&self, targets: &UserTargets) -> BTreeMap<String, UserAnalysis> {
        let mut analyses = BTreeMap::new();

        for name in &targets.users_name {
            match self.analyze_user_name(name).await {
                Ok(analysis) => {
                    analyses.insert(analysis.user_id.clone(), analysis);
                }
                Err(e) => tracing::warn!("Skipping user {name}: {e}"),
            }
        }

        for user_id in &targets.users_id {
            if analyses.contains_key(user_id) {
                continue;
            }
            match self.analyze_user_id(user_id).await {
                Ok(analysis) => {
                    analyses.insert(analysis.user_id.clone(), analysis);
                }
                Err(e) => tracing::warn!("Skipping user {user_id}: {e}"),
            }
        }

        tracing::info!("Analyzed {} users", analyses.len());
        analyses
    }

    /// Search photos carrying all of `tags` and analyze them lazily.
    ///
    /// Tags are reconciled first and only vocabulary labels are searched; a
    /// query with no such label yields nothing. Dropping the stream stops the
    /// search.
    pub fn analyze_tags<I>(
        &self,
        tags: I,
    ) -> BoxStream<'_, std::result::Result<AnalyzedPhoto, SourceError>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let reconciled = self.engine.reconcile(tags);
        if !reconciled.out_of_vocabulary.is_empty() {
            tracing::warn!(
                "Ignoring tags outside the vocabulary: {:?}",
                reconciled.out_of_vocabulary
            );
        }
        if reconciled.in_vocabulary.is_empty() {
            return stream::empty().boxed();
        }

        let query: Vec<String> = reconciled.in_vocabulary.into_iter().collect();
        tracing::info!("Searching photos tagged {query:?}");

        self.source
            .photos_for_tags(query)
            .then(move |found| async move {
                let (photo_id, record) = found?;
                self.analyze_photo(&photo_id, &record).await
            })
            .boxed()
    }

    async fn analyze_collection(
        &self,
        user_id: &str,
        user_name: Option<String>,
        photos: PhotoSet,
    ) -> UserAnalysis {
        let total = photos.len();
        let workers = self.config.parallel_workers.max(1);

        let outcomes: Vec<(String, std::result::Result<AnalyzedPhoto, SourceError>)> =
            stream::iter(photos.iter())
                .map(|(photo_id, record)| async move {
                    (photo_id.clone(), self.analyze_photo(photo_id, record).await)
                })
                .buffer_unordered(workers)
                .collect()
                .await;

        let mut analyzed = BTreeMap::new();
        let mut skipped = BTreeSet::new();
        for (photo_id, outcome) in outcomes {
            match outcome {
                Ok(photo) => {
                    analyzed.insert(photo_id, photo);
                }
                Err(e) => {
                    tracing::warn!("Skipping photo {photo_id} of user {user_id}: {e}");
                    skipped.insert(photo_id);
                }
            }
        }

        // Folded in photo id order, not completion order.
        let accumulator: Accumulator = analyzed.values().map(|photo| &photo.result).collect();
        let averages = match accumulator.finish() {
            Ok(mut aggregate) => {
                aggregate.user_id = Some(user_id.to_string());
                aggregate.user_name = user_name.clone();
                Some(aggregate)
            }
            Err(e) => {
                tracing::warn!("No averages for user {user_id}: {e}");
                None
            }
        };

        tracing::info!(
            "User {user_id}: analyzed {}/{} photos",
            analyzed.len(),
            total
        );

        UserAnalysis {
            user_id: user_id.to_string(),
            user_name,
            photos: analyzed,
            skipped,
            averages,
        }
    }
}
