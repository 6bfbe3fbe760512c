use crate::error::{PhishError, Result};
use crate::features::TfidfConfig;
use crate::model::ForestConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Offline training configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainingConfig {
    #[serde(default = "default_datasets")]
    pub datasets: Vec<PathBuf>,
    /// Directory receiving the three artifact files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub tfidf: TfidfConfig,
    #[serde(default)]
    pub forest: ForestConfig,
    #[serde(default)]
    pub split: SplitConfig,
    /// Held-out predictions echoed after evaluation
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

/// Hold-out split parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SplitConfig {
    pub test_size: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
        }
    }
}

fn default_datasets() -> Vec<PathBuf> {
    vec![
        PathBuf::from("phishingdata/CEAS_08.csv"),
        PathBuf::from("phishingdata/Nigerian_Fraud.csv"),
    ]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_preview_rows() -> usize {
    5
}

impl TrainingConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PhishError::Config(e.to_string()))?;

        let config: Self =
            toml::from_str(&content).map_err(|e| PhishError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn default() -> Self {
        Self {
            datasets: default_datasets(),
            output_dir: default_output_dir(),
            tfidf: TfidfConfig::default(),
            forest: ForestConfig::default(),
            split: SplitConfig::default(),
            preview_rows: default_preview_rows(),
        }
    }

    /// Small, permissive settings for toy corpora
    pub fn development() -> Self {
        Self {
            tfidf: TfidfConfig {
                max_features: None,
                max_df: 1.0,
                min_df: 1,
                ..TfidfConfig::default()
            },
            forest: ForestConfig {
                n_trees: 10,
                ..ForestConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.datasets.is_empty() {
            return Err(PhishError::Config("no datasets configured".to_string()));
        }
        if !(self.split.test_size > 0.0 && self.split.test_size < 1.0) {
            return Err(PhishError::Config(format!(
                "split.test_size must be in (0, 1), got {}",
                self.split.test_size
            )));
        }
        self.tfidf
            .validate()
            .map_err(|e| PhishError::Config(format!("[tfidf] {}", e)))?;
        self.forest
            .validate()
            .map_err(|e| PhishError::Config(format!("[forest] {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_reference_settings() {
        let config = TrainingConfig::default();
        assert_eq!(config.datasets.len(), 2);
        assert_eq!(config.tfidf.max_features, Some(5000));
        assert_eq!(config.tfidf.min_df, 5);
        assert_eq!(config.tfidf.max_df, 0.7);
        assert_eq!(config.forest.n_trees, 100);
        assert_eq!(config.forest.seed, 42);
        assert_eq!(config.split, SplitConfig { test_size: 0.2, seed: 42 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "output_dir = \"models\"\n\n[forest]\nn_trees = 25\n\n[tfidf]\nmin_df = 2\n"
        )
        .unwrap();

        let config = TrainingConfig::from_file(file.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("models"));
        assert_eq!(config.forest.n_trees, 25);
        assert_eq!(config.forest.seed, 42);
        assert_eq!(config.tfidf.min_df, 2);
        assert_eq!(config.tfidf.max_df, 0.7);
        assert_eq!(config.preview_rows, 5);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = TrainingConfig::default();
        config.split.test_size = 1.0;
        assert!(config.validate().is_err());

        let mut config = TrainingConfig::default();
        config.tfidf.max_df = 0.0;
        assert!(config.validate().is_err());

        let mut config = TrainingConfig::default();
        config.forest.n_trees = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = TrainingConfig::from_file("/nonexistent/phish.toml").unwrap_err();
        assert!(matches!(err, PhishError::Config(_)));
    }
}
