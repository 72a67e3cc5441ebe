//! Sentiment/emotion ontology lookups.
//!
//! The store holds one sentiment table (a single `sentiment` dimension) and
//! one emotion table (one column per emotion) for a language. Only labels
//! present in both tables are usable.

pub mod table;

pub use table::{Header, ScoreTable, TableSource};

use std::collections::BTreeSet;

use crate::config::Config;
use crate::error::OntologyError;
use crate::types::Scores;

/// Immutable sentiment and emotion tables for one ontology language.
#[derive(Debug, Clone)]
pub struct OntologyStore {
    name: String,
    language: String,
    sentiment: ScoreTable,
    emotion: ScoreTable,
}

impl OntologyStore {
    /// Load both tables from disk.
    pub fn load(
        name: impl Into<String>,
        language: impl Into<String>,
        sentiment: &TableSource,
        emotion: &TableSource,
    ) -> Result<Self, OntologyError> {
        let store = Self::from_tables(
            name,
            language,
            ScoreTable::load(sentiment)?,
            ScoreTable::load(emotion)?,
        );

        tracing::info!(
            "Loaded {} ontology ({}): {} sentiment labels, {} emotion labels over {} dimensions",
            store.name,
            store.language,
            store.sentiment.len(),
            store.emotion.len(),
            store.emotion.dimensions().len(),
        );

        Ok(store)
    }

    /// Load the tables configured for `language`.
    ///
    /// Fails with `LanguageUnavailable` when the settings have no entry for it.
    pub fn from_config(config: &Config, language: &str) -> Result<Self, OntologyError> {
        let files = config.ontology_files(language)?;
        let sentiment = TableSource::new(
            config.data_path(&files.sentiment_csv),
            Header::from_fields(files.sentiment_fields.as_deref()),
        );
        let emotion = TableSource::new(
            config.data_path(&files.emotion_csv),
            Header::from_fields(files.emotion_fields.as_deref()),
        );
        Self::load(&config.ontology.name, language, &sentiment, &emotion)
    }

    /// Build a store from already parsed tables.
    pub fn from_tables(
        name: impl Into<String>,
        language: impl Into<String>,
        sentiment: ScoreTable,
        emotion: ScoreTable,
    ) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            sentiment,
            emotion,
        }
    }

    /// Ontology kind, e.g. "MVSO".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Language the tables were loaded for.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Labels that have both a sentiment and an emotion entry.
    pub fn labels(&self) -> BTreeSet<String> {
        self.sentiment
            .labels()
            .filter(|label| self.emotion.contains(label))
            .map(str::to_string)
            .collect()
    }

    /// Sentiment dimension names.
    pub fn sentiment_dimensions(&self) -> &[String] {
        self.sentiment.dimensions()
    }

    /// Emotion dimension names.
    pub fn emotion_dimensions(&self) -> &[String] {
        self.emotion.dimensions()
    }

    /// Raw sentiment record of a single label.
    pub fn sentiment_of(&self, label: &str) -> Option<Scores> {
        self.sentiment.record(label)
    }

    /// Raw emotion record of a single label.
    pub fn emotion_of(&self, label: &str) -> Option<Scores> {
        self.emotion.record(label)
    }

    /// Mean sentiment over `labels`; `None` for an empty or unknown set.
    pub fn average_sentiment<I>(&self, labels: I) -> Option<Scores>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.sentiment.average(labels)
    }

    /// Mean emotion over `labels`; `None` for an empty or unknown set.
    pub fn average_emotion<I>(&self, labels: I) -> Option<Scores>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.emotion.average(labels)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Small store shared by tests across the crate.
    pub(crate) fn sample_store() -> OntologyStore {
        let sentiment = ScoreTable::parse(
            "old_buses,0.2\nsacred_music,0.6\nlost_souls,-0.8\nsentiment_only,0.1\n",
            Header::Fields(vec!["ANP".to_string(), "sentiment".to_string()]),
            "sentiment",
        )
        .unwrap();
        let emotion = ScoreTable::parse(
            "ANP,joy,fear\n\
             old_buses,0.2,0.4\n\
             sacred_music,0.6,0.0\n\
             lost_souls,0.1,0.7\n\
             emotion_only,0.5,0.5\n",
            Header::FirstLine,
            "emotion",
        )
        .unwrap();
        OntologyStore::from_tables("MVSO", "english", sentiment, emotion)
    }

    #[test]
    fn test_labels_require_both_tables() {
        let store = sample_store();
        let labels = store.labels();
        assert_eq!(labels.len(), 3);
        assert!(labels.contains("old_buses"));
        assert!(!labels.contains("sentiment_only"));
        assert!(!labels.contains("emotion_only"));
    }

    #[test]
    fn test_single_lookups() {
        let store = sample_store();
        assert_eq!(
            store.sentiment_of("lost_souls").unwrap().get("sentiment"),
            Some(-0.8)
        );
        assert_eq!(store.emotion_of("lost_souls").unwrap().get("fear"), Some(0.7));
        assert!(store.sentiment_of("unknown").is_none());
    }

    #[test]
    fn test_average_sentiment_of_two_labels() {
        let store = sample_store();
        let avg = store.average_sentiment(["old_buses", "sacred_music"]).unwrap();
        assert_eq!(avg.get("sentiment"), Some(0.4));
    }

    #[test]
    fn test_average_emotion_spans_every_dimension() {
        let store = sample_store();
        let avg = store.average_emotion(["old_buses", "sacred_music"]).unwrap();
        assert_eq!(avg.len(), 2);
        assert_eq!(avg.get("joy"), Some(0.4));
        assert_eq!(avg.get("fear"), Some(0.2));
    }

    #[test]
    fn test_average_of_empty_collection_is_none() {
        let store = sample_store();
        assert!(store.average_sentiment(BTreeSet::<String>::new()).is_none());
        assert!(store.average_emotion(Vec::<&str>::new()).is_none());
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let sentiment_path = dir.path().join("english.csv");
        let emotion_path = dir.path().join("emotion.csv");
        std::fs::write(&sentiment_path, "old_buses,0.2\n").unwrap();
        std::fs::write(&emotion_path, "ANP,joy\nold_buses,0.9\n").unwrap();

        let store = OntologyStore::load(
            "MVSO",
            "english",
            &TableSource::new(
                &sentiment_path,
                Header::Fields(vec!["ANP".into(), "sentiment".into()]),
            ),
            &TableSource::new(&emotion_path, Header::FirstLine),
        )
        .unwrap();

        assert_eq!(store.name(), "MVSO");
        assert_eq!(store.language(), "english");
        assert_eq!(store.labels().len(), 1);
        assert_eq!(store.emotion_dimensions(), &["joy"]);
        assert_eq!(store.sentiment_dimensions(), &["sentiment"]);
    }

    #[test]
    fn test_from_config_unknown_language() {
        let config = Config::default();
        let err = OntologyStore::from_config(&config, "spanish").unwrap_err();
        assert!(matches!(err, OntologyError::LanguageUnavailable { .. }));
    }

    #[test]
    fn test_from_config_reads_configured_language() {
        let dir = tempfile::tempdir().unwrap();
        let sentiment_path = dir.path().join("s.csv");
        let emotion_path = dir.path().join("e.csv");
        std::fs::write(&sentiment_path, "ANP,sentiment\nvecchia_casa,0.3\n").unwrap();
        std::fs::write(&emotion_path, "ANP,joy\nvecchia_casa,0.1\n").unwrap();

        let mut config = Config::default();
        config.ontology.languages.insert(
            "italian".to_string(),
            crate::config::OntologyFiles {
                sentiment_csv: sentiment_path.display().to_string(),
                emotion_csv: emotion_path.display().to_string(),
                sentiment_fields: None,
                emotion_fields: None,
            },
        );

        let store = OntologyStore::from_config(&config, "italian").unwrap();
        assert!(store.labels().contains("vecchia_casa"));
    }
}
