//! Feature builder
//!
//! Glues vectorizer, sentiment scorer and scaler together so that training
//! and inference produce columns in exactly the same order:
//! TF-IDF terms, then sentiment, then standardization.

use tracing::{debug, info};

use super::{FeatureMatrix, SentimentAnalyzer, StandardScaler, TfidfConfig, TfidfVectorizer};
use crate::error::{PhishError, Result};

/// Fitted (or fittable) feature pipeline
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    vectorizer: TfidfVectorizer,
    scaler: StandardScaler,
    sentiment: SentimentAnalyzer,
}

impl FeatureBuilder {
    /// Create an unfitted builder
    pub fn new(config: TfidfConfig) -> Self {
        Self {
            vectorizer: TfidfVectorizer::new(config),
            scaler: StandardScaler::new(),
            sentiment: SentimentAnalyzer::new(),
        }
    }

    /// Assemble a builder from previously fitted parts.
    ///
    /// Fails if the scaler was not fitted on `vocabulary + 1` columns.
    pub fn from_parts(vectorizer: TfidfVectorizer, scaler: StandardScaler) -> Result<Self> {
        let expected = vectorizer.vocabulary_size() + 1;
        if scaler.n_features() != expected {
            return Err(PhishError::DimensionMismatch {
                expected,
                actual: scaler.n_features(),
            });
        }
        Ok(Self {
            vectorizer,
            scaler,
            sentiment: SentimentAnalyzer::new(),
        })
    }

    /// Fit vectorizer and scaler on a normalized corpus and return the
    /// scaled training matrix.
    pub fn fit(&mut self, corpus: &[String]) -> Result<FeatureMatrix> {
        self.vectorizer.fit(corpus)?;
        info!(
            "Fitted TF-IDF vocabulary: {} terms from {} documents",
            self.vectorizer.vocabulary_size(),
            corpus.len()
        );

        let mut matrix = FeatureMatrix::with_capacity(self.n_features(), corpus.len());
        for doc in corpus {
            let row = self.raw_features(doc)?;
            matrix.push_row(&row)?;
        }
        debug!("Built raw feature matrix {}x{}", matrix.n_rows(), matrix.n_cols());

        self.scaler.fit(&matrix)?;
        self.scaler.transform(&mut matrix)?;

        Ok(matrix)
    }

    /// Lexical columns plus the sentiment column, unscaled
    pub fn raw_features(&self, text: &str) -> Result<Vec<f64>> {
        let mut row = self.vectorizer.transform(text)?;
        row.push(self.sentiment.compound(text));
        Ok(row)
    }

    /// Final feature vector for one normalized text
    pub fn transform(&self, text: &str) -> Result<Vec<f64>> {
        let mut row = self.raw_features(text)?;
        self.scaler.transform_row(&mut row)?;
        Ok(row)
    }

    /// Sentiment score of a normalized text
    pub fn sentiment(&self, text: &str) -> f64 {
        self.sentiment.compound(text)
    }

    /// Length of every feature vector: vocabulary plus the sentiment column
    pub fn n_features(&self) -> usize {
        self.vectorizer.vocabulary_size() + 1
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Split back into the persisted parts
    pub fn into_parts(self) -> (TfidfVectorizer, StandardScaler) {
        (self.vectorizer, self.scaler)
    }
}
