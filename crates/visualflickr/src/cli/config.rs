//! The `visualflickr config` command for configuration management.

use clap::{Args, Subcommand};
use visualflickr_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let path = Config::default_path();
            if !path.exists() {
                tracing::info!(
                    "No config file at {}, showing defaults. \
                     Create one with `visualflickr config init`.",
                    path.display()
                );
            }
            let config = Config::load()?;
            println!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            let path = Config::default_path();
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            // Ensure parent directory exists
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = default_config_file()?;
            std::fs::write(&path, toml)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Default settings as TOML, ready to be edited.
fn default_config_file() -> anyhow::Result<String> {
    let header = "# VisualFlickr configuration.\n\
                  # Paths accept ~. Add [ontology.languages.<lang>] and\n\
                  # [classifier.languages.<lang>] sections for more languages.\n\n";
    Ok(format!("{header}{}", Config::default().to_toml()?))
}
