//! VisualFlickr CLI - Tag reliability and sentiment analysis for photo collections.
//!
//! VisualFlickr compares the tags users put on their photos with the labels
//! of a visual classifier, and scores both against a sentiment/emotion
//! ontology.
//!
//! # Usage
//!
//! ```bash
//! # Analyze one user's photos
//! visualflickr analyze user-id 7488735@N03 --photos photos.json --classifications labels.json
//!
//! # Analyze every user listed in a file
//! visualflickr analyze users users.json --output results.json
//!
//! # Search photos by tag and score them
//! visualflickr tags "old buses" --limit 10
//!
//! # Explore the vocabulary
//! visualflickr labels check sacredmusic
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// VisualFlickr - Tag reliability and sentiment analysis for photo collections.
#[derive(Parser, Debug)]
#[command(name = "visualflickr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Ontology and classifier language (overrides general.language)
    #[arg(short = 'L', long, global = true)]
    language: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Score users' photos and average them per user
    Analyze(cli::analyze::AnalyzeArgs),

    /// Search photos by vocabulary tags and score them
    Tags(cli::tags::TagsArgs),

    /// Check, sample and list vocabulary labels
    Labels(cli::labels::LabelsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let mut config = match visualflickr_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. \
                 Check your config file with `visualflickr config path`."
            );
            visualflickr_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    if let Some(language) = cli.language {
        config.general.language = language;
    }

    tracing::debug!(
        "VisualFlickr v{} ({})",
        visualflickr_core::VERSION,
        config.general.language
    );

    match cli.command {
        Commands::Analyze(args) => cli::analyze::execute(args, config).await,
        Commands::Tags(args) => cli::tags::execute(args, config).await,
        Commands::Labels(args) => cli::labels::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
