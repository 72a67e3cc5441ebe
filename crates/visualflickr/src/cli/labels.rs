//! The `visualflickr labels` command for exploring the vocabulary.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::io::Write;

use visualflickr_core::{Config, LabelReconciler, OntologyStore, Scores};

use super::output::{open, write_json};
use super::setup::setup_vocabulary;

/// Arguments for the `labels` command.
#[derive(Args, Debug)]
pub struct LabelsArgs {
    #[command(subcommand)]
    pub command: LabelsCommand,
}

/// Subcommands for vocabulary exploration.
#[derive(Subcommand, Debug)]
pub enum LabelsCommand {
    /// Check whether a tag maps to a vocabulary label, and show its scores
    Check { tag: String },

    /// Print a random vocabulary label
    Hint,

    /// List every vocabulary label
    List {
        /// Also list the collapsed lookup forms (e.g. oldbuses)
        #[arg(long)]
        collapsed: bool,
    },
}

/// Vocabulary status of a single tag.
#[derive(Debug, Serialize, PartialEq)]
struct LabelCheck {
    tag: String,
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment: Option<Scores>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emotion: Option<Scores>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dominant_emotion: Option<String>,
}

fn check(store: &OntologyStore, reconciler: &LabelReconciler, tag: &str) -> LabelCheck {
    let label = reconciler.check_availability(tag);
    let emotion = label.and_then(|l| store.emotion_of(l));
    let dominant_emotion = emotion
        .as_ref()
        .and_then(|e| e.dominant())
        .map(|(dimension, _)| dimension.to_string());
    LabelCheck {
        tag: tag.to_string(),
        label: label.map(str::to_string),
        sentiment: label.and_then(|l| store.sentiment_of(l)),
        emotion,
        dominant_emotion,
    }
}

/// Execute the labels command.
pub async fn execute(args: LabelsArgs, config: Config) -> anyhow::Result<()> {
    let (store, reconciler) = setup_vocabulary(&config)?;

    match args.command {
        LabelsCommand::Check { tag } => {
            let result = check(&store, &reconciler, &tag);
            if result.label.is_none() {
                tracing::warn!("Tag {tag:?} is not in the vocabulary");
            }
            write_json(&result, None, config.output.pretty)?;
        }

        LabelsCommand::Hint => match reconciler.sample() {
            Some(label) => println!("{label}"),
            None => anyhow::bail!("The vocabulary is empty"),
        },

        LabelsCommand::List { collapsed } => {
            let labels = if collapsed {
                reconciler.labels_with_collapsed()
            } else {
                reconciler.labels().clone()
            };
            let mut writer = open(None)?;
            for label in &labels {
                writeln!(writer, "{label}")?;
            }
            writer.flush()?;
            tracing::info!(
                "{} labels ({} collapsed-form collisions)",
                reconciler.len(),
                reconciler.collisions()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use visualflickr_core::ontology::{Header, ScoreTable};

    fn vocabulary() -> (OntologyStore, LabelReconciler) {
        let sentiment =
            ScoreTable::parse("ANP,sentiment\nold_buses,0.2\n", Header::FirstLine, "s").unwrap();
        let emotion =
            ScoreTable::parse("ANP,fear,joy\nold_buses,0.1,0.9\n", Header::FirstLine, "e").unwrap();
        let store = OntologyStore::from_tables("MVSO", "english", sentiment, emotion);
        let reconciler = LabelReconciler::build(["old_buses", "tiny_lights"], store.labels());
        (store, reconciler)
    }

    #[test]
    fn check_known_tag_reports_scores() {
        let (store, reconciler) = vocabulary();
        let result = check(&store, &reconciler, "Old Buses");
        assert_eq!(result.label.as_deref(), Some("old_buses"));
        assert_eq!(result.sentiment.and_then(|s| s.get("sentiment")), Some(0.2));
        assert_eq!(result.dominant_emotion.as_deref(), Some("joy"));
        assert_eq!(result.emotion.and_then(|s| s.get("joy")), Some(0.9));
    }

    #[test]
    fn check_unknown_tag() {
        let (store, reconciler) = vocabulary();
        let result = check(&store, &reconciler, "tiny_lights");
        assert!(result.label.is_none());
        assert!(result.sentiment.is_none());

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"tag":"tiny_lights","label":null}"#);
    }
}
