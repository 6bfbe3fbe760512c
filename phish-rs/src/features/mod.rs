//! Feature construction
//!
//! TF-IDF lexical columns, one sentiment column, standardization.

pub mod builder;
pub mod lexicon;
pub mod scaler;
pub mod sentiment;
pub mod tfidf;

pub use builder::FeatureBuilder;
pub use scaler::StandardScaler;
pub use sentiment::SentimentAnalyzer;
pub use tfidf::{TfidfConfig, TfidfVectorizer};

use crate::error::{PhishError, Result};

/// Dense row-major feature matrix
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    n_cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Create an empty matrix with a fixed column count
    pub fn new(n_cols: usize) -> Self {
        Self {
            n_cols,
            data: Vec::new(),
        }
    }

    /// Create an empty matrix with room for `n_rows` rows
    pub fn with_capacity(n_cols: usize, n_rows: usize) -> Self {
        Self {
            n_cols,
            data: Vec::with_capacity(n_cols * n_rows),
        }
    }

    /// Build a matrix from equally sized rows
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut matrix = Self::with_capacity(n_cols, rows.len());
        for row in rows {
            matrix.push_row(&row)?;
        }
        Ok(matrix)
    }

    /// Append a row; its length must match the column count
    pub fn push_row(&mut self, row: &[f64]) -> Result<()> {
        if row.len() != self.n_cols {
            return Err(PhishError::DimensionMismatch {
                expected: self.n_cols,
                actual: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        if self.n_cols == 0 {
            0
        } else {
            self.data.len() / self.n_cols
        }
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.n_cols.max(1))
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [f64]> {
        self.data.chunks_exact_mut(self.n_cols.max(1))
    }

    /// Copy the selected rows into a new matrix
    pub fn select(&self, indices: &[usize]) -> Self {
        let mut out = Self::with_capacity(self.n_cols, indices.len());
        for &i in indices {
            out.data.extend_from_slice(self.row(i));
        }
        out
    }
}
