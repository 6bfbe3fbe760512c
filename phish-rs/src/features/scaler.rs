//! Per-column standardization

use serde::{Deserialize, Serialize};

use super::FeatureMatrix;
use crate::error::{PhishError, Result};

/// Standard scaler: `(x - mean) / std`, statistics frozen at fit time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute per-column mean and population standard deviation.
    ///
    /// Constant columns get a scale of 1.0 so they map to zero.
    pub fn fit(&mut self, matrix: &FeatureMatrix) -> Result<()> {
        let n_rows = matrix.n_rows();
        let n_cols = matrix.n_cols();
        if n_rows == 0 || n_cols == 0 {
            return Err(PhishError::InvalidParameter(
                "cannot fit scaler on an empty matrix".to_string(),
            ));
        }

        let mut mean = vec![0.0; n_cols];
        for row in matrix.rows() {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n_rows as f64;
        }

        let mut var = vec![0.0; n_cols];
        for row in matrix.rows() {
            for ((acc, v), m) in var.iter_mut().zip(row).zip(&mean) {
                let d = v - m;
                *acc += d * d;
            }
        }

        self.scale = var
            .into_iter()
            .map(|v| {
                let std = (v / n_rows as f64).sqrt();
                if std < 10.0 * f64::EPSILON {
                    1.0
                } else {
                    std
                }
            })
            .collect();
        self.mean = mean;

        Ok(())
    }

    /// Standardize a single row in place
    pub fn transform_row(&self, row: &mut [f64]) -> Result<()> {
        if self.mean.is_empty() {
            return Err(PhishError::NotFitted("StandardScaler"));
        }
        if row.len() != self.mean.len() {
            return Err(PhishError::DimensionMismatch {
                expected: self.mean.len(),
                actual: row.len(),
            });
        }
        for ((v, m), s) in row.iter_mut().zip(&self.mean).zip(&self.scale) {
            *v = (*v - m) / s;
        }
        Ok(())
    }

    /// Standardize every row of a matrix in place
    pub fn transform(&self, matrix: &mut FeatureMatrix) -> Result<()> {
        for row in matrix.rows_mut() {
            self.transform_row(row)?;
        }
        Ok(())
    }

    /// Number of columns the scaler was fitted on
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}
