//! Evaluation settings loaded from YAML

use crate::eval::KappaVariant;
use crate::storage::{ModelOutputs, ResultsStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "foldscore.yaml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid number of classes: {0} (must be >= 1)")]
    InvalidNumClasses(usize),
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Evaluation settings
///
/// ```yaml
/// num_classes: 5
/// store: results.db
/// kappa_variant: quadratic_weighted
/// outputs:
///   best_f1_model: best_model.txt
///   best_kappa_model: best_model_kappa.txt
///   final_model: final_model.txt
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Number of classes; labels are `0..num_classes`
    pub num_classes: usize,

    /// Results store file
    pub store: PathBuf,

    /// Kappa variant persisted as a run's designated `kappa`
    pub kappa_variant: KappaVariant,

    /// Where selected models are copied
    pub outputs: ModelOutputs,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            num_classes: 5,
            store: PathBuf::from("results.db"),
            kappa_variant: KappaVariant::default(),
            outputs: ModelOutputs::default(),
        }
    }
}

impl EvalConfig {
    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_yaml(&text)
    }

    /// Parse and validate settings from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_classes == 0 {
            return Err(ConfigError::InvalidNumClasses(self.num_classes));
        }
        Ok(())
    }

    /// Results store handle for these settings
    pub fn store(&self) -> ResultsStore {
        ResultsStore::new(&self.store, self.outputs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = EvalConfig::default();
        assert_eq!(config.num_classes, 5);
        assert_eq!(config.store, PathBuf::from("results.db"));
        assert_eq!(config.kappa_variant, KappaVariant::QuadraticWeighted);
        assert_eq!(config.outputs.best_f1_model, PathBuf::from("best_model.txt"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = EvalConfig::load(dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, EvalConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = "num_classes: 3\nkappa_variant: cohen\noutputs:\n  final_model: prod.txt\n";
        let config = EvalConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.num_classes, 3);
        assert_eq!(config.kappa_variant, KappaVariant::Cohen);
        assert_eq!(config.outputs.final_model, PathBuf::from("prod.txt"));
        assert_eq!(config.outputs.best_kappa_model, PathBuf::from("best_model_kappa.txt"));
        assert_eq!(config.store, PathBuf::from("results.db"));
    }

    #[test]
    fn test_zero_classes_rejected() {
        let err = EvalConfig::from_yaml("num_classes: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumClasses(0)));
    }

    #[test]
    fn test_bad_yaml_rejected() {
        let err = EvalConfig::from_yaml("num_classes: [oops").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foldscore.yaml");
        fs::write(&path, "store: folds.db\n").unwrap();
        let config = EvalConfig::load(&path).unwrap();
        assert_eq!(config.store, PathBuf::from("folds.db"));
    }
}
