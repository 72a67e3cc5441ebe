//! The `visualflickr analyze` command for scoring users' photo collections.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use visualflickr_core::{Config, UserTargets};

use super::output::{strip_details, write_json};
use super::setup::{expand, setup_analyzer, SourceArgs};

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(subcommand)]
    pub target: AnalyzeTarget,

    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output file (defaults to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Include per-photo inputs (title, file path, user and visual tags)
    #[arg(long, global = true)]
    pub details: bool,
}

/// Which users to analyze.
#[derive(Subcommand, Debug)]
pub enum AnalyzeTarget {
    /// A single user by id, e.g. 7488735@N03
    UserId { id: String },

    /// A single user by name
    UserName { name: String },

    /// Every user listed in a JSON file: {"users_name": [...], "users_id": [...]}
    Users { file: PathBuf },
}

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs, config: Config) -> anyhow::Result<()> {
    let analyzer = setup_analyzer(&config, &args.sources)?;
    let output = args.output.as_deref();
    let pretty = config.output.pretty;

    match &args.target {
        AnalyzeTarget::UserId { id } => {
            let mut analysis = analyzer.analyze_user_id(id).await?;
            if !args.details {
                strip_details(&mut analysis);
            }
            write_json(&analysis, output, pretty)?;
        }

        AnalyzeTarget::UserName { name } => {
            let mut analysis = analyzer.analyze_user_name(name).await?;
            if !args.details {
                strip_details(&mut analysis);
            }
            write_json(&analysis, output, pretty)?;
        }

        AnalyzeTarget::Users { file } => {
            let targets = read_targets(&expand(file))?;
            tracing::info!(
                "Analyzing {} users by name and {} by id",
                targets.users_name.len(),
                targets.users_id.len()
            );

            let mut analyses = analyzer.analyze_users(&targets).await;
            if !args.details {
                analyses.values_mut().for_each(strip_details);
            }
            write_json(&analyses, output, pretty)?;
        }
    }

    Ok(())
}

fn read_targets(path: &std::path::Path) -> anyhow::Result<UserTargets> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read users file {:?}: {e}", path))?;
    let targets: UserTargets = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid users file {:?}: {e}", path))?;

    if targets.is_empty() {
        anyhow::bail!(
            "Users file {:?} names no user.\n\n  \
             Hint: Expected {{\"users_name\": [...], \"users_id\": [...]}}",
            path
        );
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_targets_accepts_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, r#"{"users_name": ["alice"]}"#).unwrap();

        let targets = read_targets(&path).unwrap();
        assert_eq!(targets.users_name, vec!["alice"]);
        assert!(targets.users_id.is_empty());
    }

    #[test]
    fn read_targets_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "{}").unwrap();

        let err = read_targets(&path).unwrap_err();
        assert!(err.to_string().contains("names no user"));
    }

    #[test]
    fn read_targets_missing_file() {
        let err = read_targets(std::path::Path::new("/nonexistent/users.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read users file"));
    }
}
