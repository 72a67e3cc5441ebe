//! The `visualflickr tags` command: search photos by vocabulary tags and score them.

use clap::Args;
use futures_util::StreamExt;
use std::io::Write;
use std::path::{Path, PathBuf};

use visualflickr_core::{Analyzer, Config};

use super::output::{open, write_line};
use super::setup::{expand, setup_analyzer, SourceArgs};

/// Arguments for the `tags` command.
#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Tags the photos must all carry, e.g. "old buses" or old_buses
    #[arg(required_unless_present = "file")]
    pub tags: Vec<String>,

    /// Read tags from a file, one per line
    #[arg(long, conflicts_with = "tags")]
    pub file: Option<PathBuf>,

    /// Stop after this many analyzed photos
    #[arg(short, long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output file (defaults to stdout). One JSON object per line.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include per-photo inputs (title, file path, user and visual tags)
    #[arg(long)]
    pub details: bool,
}

/// Execute the tags command.
pub async fn execute(args: TagsArgs, config: Config) -> anyhow::Result<()> {
    let tags = match &args.file {
        Some(path) => read_tags(&expand(path))?,
        None => args.tags.clone(),
    };

    let analyzer = setup_analyzer(&config, &args.sources)?;
    let available = report_availability(&analyzer, &tags);
    if available.is_empty() {
        let hint = analyzer
            .label_hint()
            .map(|label| format!("\n\n  Hint: Try a vocabulary label such as {label:?}."))
            .unwrap_or_default();
        anyhow::bail!("None of the tags {tags:?} is in the vocabulary.{hint}");
    }

    let mut writer = open(args.output.as_deref())?;
    let mut results = analyzer.analyze_tags(&available);
    let mut written = 0usize;

    while let Some(outcome) = results.next().await {
        match outcome {
            Ok(mut photo) => {
                if !args.details {
                    photo.details = None;
                }
                write_line(&mut *writer, &photo)?;
                written += 1;
                if args.limit.is_some_and(|limit| written >= limit) {
                    break;
                }
            }
            Err(e) => tracing::warn!("Skipping photo: {e}"),
        }
    }
    writer.flush()?;

    tracing::info!("Analyzed {written} photos tagged {available:?}");
    Ok(())
}

/// Log each tag's vocabulary status; return the canonical labels found.
fn report_availability(analyzer: &Analyzer, tags: &[String]) -> Vec<String> {
    let mut available = Vec::new();
    for tag in tags {
        match analyzer.check_availability(tag) {
            Some(label) => {
                tracing::info!("Tag {tag:?} is available as {label:?}");
                available.push(label.to_string());
            }
            None => tracing::warn!("Tag {tag:?} is not in the vocabulary, ignoring it"),
        }
    }
    available
}

fn read_tags(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read tags file {:?}: {e}", path))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
