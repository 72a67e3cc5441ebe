//! Session setup: source and classifier files, vocabulary loading.

use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use visualflickr_core::{
    load_vocabulary, Analyzer, Config, JsonPhotoSource, LabelReconciler, OntologyStore,
    PrecomputedClassifier,
};

/// Local data files, overriding the `[source]` config section.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Photo collection JSON (users, their photos and tags)
    #[arg(long, global = true, env = "VISUALFLICKR_PHOTOS")]
    pub photos: Option<PathBuf>,

    /// Precomputed classifier labels JSON (photo id to labels)
    #[arg(long, global = true, env = "VISUALFLICKR_CLASSIFICATIONS")]
    pub classifications: Option<PathBuf>,
}

/// Expand `~` in a path given on the command line.
pub fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

fn resolve(
    config: &Config,
    flag: Option<&Path>,
    configured: Option<&str>,
    what: &str,
    flag_name: &str,
    config_key: &str,
) -> anyhow::Result<PathBuf> {
    let path = match (flag, configured) {
        (Some(path), _) => expand(path),
        (None, Some(raw)) => config.data_path(raw),
        (None, None) => anyhow::bail!(
            "No {what} file given.\n\n  \
             Hint: Pass {flag_name} <FILE> or set {config_key} in the config file."
        ),
    };

    if !path.exists() {
        anyhow::bail!(
            "{what} file does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            path
        );
    }
    Ok(path)
}

/// Load the ontology and vocabulary for the configured language.
pub fn setup_vocabulary(config: &Config) -> anyhow::Result<(OntologyStore, LabelReconciler)> {
    let language = &config.general.language;
    let (store, reconciler) = load_vocabulary(config, language)?;

    if reconciler.is_empty() {
        tracing::warn!(
            "The {language} vocabulary is empty: \
             no classifier label has both a sentiment and an emotion record"
        );
    }
    Ok((store, reconciler))
}

/// Build an analysis session from config plus command-line overrides.
pub fn setup_analyzer(config: &Config, sources: &SourceArgs) -> anyhow::Result<Analyzer> {
    let photos = resolve(
        config,
        sources.photos.as_deref(),
        config.source.photos_file.as_deref(),
        "Photo collection",
        "--photos",
        "source.photos_file",
    )?;
    let classifications = resolve(
        config,
        sources.classifications.as_deref(),
        config.source.classifications_file.as_deref(),
        "Classification",
        "--classifications",
        "source.classifications_file",
    )?;

    let source = JsonPhotoSource::load(&photos)?;
    let classifier = PrecomputedClassifier::load(&classifications, config.classifier.top_k)?;
    let (store, reconciler) = setup_vocabulary(config)?;

    Ok(Analyzer::new(
        store,
        reconciler,
        Arc::new(classifier),
        Arc::new(source),
        config,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_file_has_hint() {
        let err = setup_analyzer(&Config::default(), &SourceArgs::default()).err().unwrap();
        let message = err.to_string();
        assert!(message.contains("--photos"));
        assert!(message.contains("source.photos_file"));
    }

    #[test]
    fn flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let flag = dir.path().join("flag.json");
        std::fs::write(&flag, "{}").unwrap();

        let config = Config::default();
        let path = resolve(
            &config,
            Some(flag.as_path()),
            Some("/nonexistent.json"),
            "Photo",
            "--photos",
            "key",
        )
        .unwrap();
        assert_eq!(path, flag);
    }

    #[test]
    fn configured_relative_path_uses_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("photos.json"), "{}").unwrap();

        let mut config = Config::default();
        config.general.data_dir = dir.path().to_path_buf();
        let path = resolve(&config, None, Some("photos.json"), "Photo", "--photos", "key").unwrap();
        assert_eq!(path, dir.path().join("photos.json"));
    }

    #[test]
    fn nonexistent_path_is_rejected() {
        let config = Config::default();
        let err = resolve(
            &config,
            None,
            Some("/nonexistent/photos.json"),
            "Photo",
            "--photos",
            "key",
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn expand_leaves_absolute_paths() {
        assert_eq!(
            expand(Path::new("/data/photos.json")),
            PathBuf::from("/data/photos.json")
        );
    }
}
