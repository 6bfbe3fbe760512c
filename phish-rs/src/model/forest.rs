//! Random forest classifier

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tree::{DecisionTree, TreeConfig};
use crate::error::{PhishError, Result};
use crate::features::FeatureMatrix;

/// Random forest configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    #[serde(default = "default_n_trees")]
    pub n_trees: usize,
    /// Maximum depth of each tree (None = fully grown)
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Minimum samples to split
    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,
    /// Features examined per split (sqrt of total if None)
    #[serde(default)]
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    #[serde(default = "default_bootstrap")]
    pub bootstrap: bool,
    /// Random seed
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_n_trees() -> usize {
    100
}

fn default_min_samples_split() -> usize {
    2
}

fn default_min_samples_leaf() -> usize {
    1
}

fn default_bootstrap() -> bool {
    true
}

fn default_seed() -> u64 {
    42
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: default_n_trees(),
            max_depth: None,
            min_samples_split: default_min_samples_split(),
            min_samples_leaf: default_min_samples_leaf(),
            max_features: None,
            bootstrap: default_bootstrap(),
            seed: default_seed(),
        }
    }
}

impl ForestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(PhishError::InvalidParameter(
                "n_trees must be positive".to_string(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(PhishError::InvalidParameter(
                "min_samples_split must be at least 2".to_string(),
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(PhishError::InvalidParameter(
                "min_samples_leaf must be positive".to_string(),
            ));
        }
        if self.max_features == Some(0) {
            return Err(PhishError::InvalidParameter(
                "max_features must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fitted random forest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
    n_features: usize,
    n_classes: usize,
    feature_importances: Vec<f64>,
}

impl RandomForest {
    /// Train a forest on the given rows.
    ///
    /// Labels must be class indices `0..n_classes`; at least two classes
    /// are required.
    pub fn fit(config: ForestConfig, x: &FeatureMatrix, labels: &[usize]) -> Result<Self> {
        config.validate()?;
        let n_samples = x.n_rows();
        if n_samples == 0 {
            return Err(PhishError::Dataset("cannot fit on zero samples".to_string()));
        }
        if labels.len() != n_samples {
            return Err(PhishError::DimensionMismatch {
                expected: n_samples,
                actual: labels.len(),
            });
        }

        let n_classes = labels.iter().copied().max().unwrap_or(0) + 1;
        if n_classes < 2 {
            return Err(PhishError::Dataset(
                "training labels contain a single class".to_string(),
            ));
        }

        let n_features = x.n_cols();
        let max_features = config
            .max_features
            .unwrap_or_else(|| ((n_features as f64).sqrt() as usize).max(1))
            .min(n_features);

        let tree_config = TreeConfig {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            min_samples_leaf: config.min_samples_leaf,
            max_features,
        };

        // Build trees in parallel
        let fitted: Vec<(DecisionTree, Vec<f64>)> = (0..config.n_trees)
            .into_par_iter()
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(i as u64));
                let indices: Vec<usize> = if config.bootstrap {
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
                } else {
                    (0..n_samples).collect()
                };
                DecisionTree::fit(x, labels, n_classes, indices, &tree_config, &mut rng)
            })
            .collect();

        let mut feature_importances = vec![0.0; n_features];
        let mut trees = Vec::with_capacity(fitted.len());
        for (tree, importances) in fitted {
            let sum: f64 = importances.iter().sum();
            if sum > 0.0 {
                for (total, imp) in feature_importances.iter_mut().zip(&importances) {
                    *total += imp / sum;
                }
            }
            trees.push(tree);
        }

        // Normalize
        let sum: f64 = feature_importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut feature_importances {
                *imp /= sum;
            }
        }

        debug!(
            "Fitted {} trees, {} total nodes",
            trees.len(),
            trees.iter().map(|t| t.n_nodes()).sum::<usize>()
        );

        Ok(Self {
            config,
            trees,
            n_features,
            n_classes,
            feature_importances,
        })
    }

    /// Mean class distribution over all trees
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.n_features {
            return Err(PhishError::DimensionMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (total, p) in proba.iter_mut().zip(tree.predict_proba(row)) {
                *total += p;
            }
        }
        let n = self.trees.len().max(1) as f64;
        for p in &mut proba {
            *p /= n;
        }
        Ok(proba)
    }

    /// Most probable class (ties go to the lower class index)
    pub fn predict(&self, row: &[f64]) -> Result<usize> {
        let proba = self.predict_proba(row)?;
        Ok(argmax(&proba))
    }

    /// Predict every row of a matrix, returning (class, P(class = 1))
    pub fn predict_matrix(&self, x: &FeatureMatrix) -> Result<Vec<(usize, f64)>> {
        x.rows()
            .collect::<Vec<_>>()
            .par_iter()
            .map(|row| {
                let proba = self.predict_proba(row)?;
                Ok((argmax(&proba), proba.get(1).copied().unwrap_or(0.0)))
            })
            .collect()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Normalized impurity-based importance per feature
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_data() -> (FeatureMatrix, Vec<usize>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..40 {
            let v = i as f64 / 40.0;
            rows.push(vec![v, (i % 3) as f64, 0.5]);
            labels.push(usize::from(v >= 0.5));
        }
        (FeatureMatrix::from_rows(rows).unwrap(), labels)
    }

    fn small_config() -> ForestConfig {
        ForestConfig {
            n_trees: 15,
            ..ForestConfig::default()
        }
    }

    #[test]
    fn test_fit_and_predict() {
        let (x, y) = toy_data();
        let forest = RandomForest::fit(small_config(), &x, &y).unwrap();

        assert_eq!(forest.n_trees(), 15);
        assert_eq!(forest.n_features(), 3);
        assert_eq!(forest.predict(&[0.05, 1.0, 0.5]).unwrap(), 0);
        assert_eq!(forest.predict(&[0.95, 1.0, 0.5]).unwrap(), 1);

        let proba = forest.predict_proba(&[0.95, 0.0, 0.5]).unwrap();
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(proba[1] > 0.5);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let (x, y) = toy_data();
        let a = RandomForest::fit(small_config(), &x, &y).unwrap();
        let b = RandomForest::fit(small_config(), &x, &y).unwrap();

        for row in x.rows() {
            assert_eq!(a.predict_proba(row).unwrap(), b.predict_proba(row).unwrap());
        }
    }

    #[test]
    fn test_importances_favor_informative_feature() {
        let (x, y) = toy_data();
        let forest = RandomForest::fit(small_config(), &x, &y).unwrap();
        let imp = forest.feature_importances();

        assert!((imp.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(imp[0] > imp[1]);
        assert_eq!(imp[2], 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let (x, y) = toy_data();
        let forest = RandomForest::fit(small_config(), &x, &y).unwrap();
        assert!(matches!(
            forest.predict_proba(&[1.0]),
            Err(PhishError::DimensionMismatch { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_single_class_rejected() {
        let x = FeatureMatrix::from_rows(vec![vec![0.0], vec![1.0]]).unwrap();
        assert!(RandomForest::fit(small_config(), &x, &[0, 0]).is_err());
    }

    #[test]
    fn test_invalid_config() {
        let config = ForestConfig {
            n_trees: 0,
            ..ForestConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_argmax_tie_goes_low() {
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.2, 0.8]), 1);
    }
}
