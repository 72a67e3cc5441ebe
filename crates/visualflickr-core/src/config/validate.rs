//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.parallel_workers == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.parallel_workers must be > 0".into(),
            ));
        }
        if self.classifier.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "classifier.top_k must be > 0".into(),
            ));
        }
        if !(self.scoring.reliability_max > 0.0) {
            return Err(ConfigError::ValidationError(
                "scoring.reliability_max must be > 0".into(),
            ));
        }
        if self.general.language.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "general.language must not be empty".into(),
            ));
        }
        for (language, files) in &self.ontology.languages {
            for (key, fields) in [
                ("sentiment_fields", &files.sentiment_fields),
                ("emotion_fields", &files.emotion_fields),
            ] {
                if matches!(fields, Some(names) if names.len() < 2) {
                    return Err(ConfigError::ValidationError(format!(
                        "ontology.languages.{language}.{key} needs a label column \
                         and at least one score column"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_parallel_workers() {
        let mut config = Config::default();
        config.analysis.parallel_workers = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("parallel_workers"));
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut config = Config::default();
        config.classifier.top_k = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("top_k"));
    }

    #[test]
    fn test_validate_rejects_non_positive_reliability_max() {
        let mut config = Config::default();
        config.scoring.reliability_max = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("reliability_max"));

        config.scoring.reliability_max = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_field_list() {
        let mut config = Config::default();
        if let Some(files) = config.ontology.languages.get_mut("english") {
            files.emotion_fields = Some(vec!["ANP".to_string()]);
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("emotion_fields"));
    }
}
