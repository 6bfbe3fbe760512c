//! TF-IDF vectorizer
//!
//! Learns a bounded vocabulary of unigrams and bigrams from the training
//! corpus and turns documents into L2-normalised TF-IDF rows. Column order
//! is alphabetical by term and frozen once fitted.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::{PhishError, Result};

/// Vectorizer parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfConfig {
    /// Keep at most this many terms, ranked by corpus frequency
    #[serde(default = "default_max_features")]
    pub max_features: Option<usize>,
    /// Drop terms present in more than this fraction of documents
    #[serde(default = "default_max_df")]
    pub max_df: f64,
    /// Drop terms present in fewer than this many documents
    #[serde(default = "default_min_df")]
    pub min_df: usize,
    /// Smallest n-gram length
    #[serde(default = "default_ngram_min")]
    pub ngram_min: usize,
    /// Largest n-gram length
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,
}

fn default_max_features() -> Option<usize> {
    Some(5000)
}

fn default_max_df() -> f64 {
    0.7
}

fn default_min_df() -> usize {
    5
}

fn default_ngram_min() -> usize {
    1
}

fn default_ngram_max() -> usize {
    2
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
            max_df: default_max_df(),
            min_df: default_min_df(),
            ngram_min: default_ngram_min(),
            ngram_max: default_ngram_max(),
        }
    }
}

impl TfidfConfig {
    /// Validate parameter ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(PhishError::InvalidParameter(format!(
                "max_df must be in (0, 1], got {}",
                self.max_df
            )));
        }
        if self.ngram_min == 0 || self.ngram_min > self.ngram_max {
            return Err(PhishError::InvalidParameter(format!(
                "invalid ngram range ({}, {})",
                self.ngram_min, self.ngram_max
            )));
        }
        if self.max_features == Some(0) {
            return Err(PhishError::InvalidParameter(
                "max_features must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// TF-IDF vectorizer with a frozen vocabulary after [`fit`](Self::fit)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    config: TfidfConfig,
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
    n_documents: usize,
}

impl TfidfVectorizer {
    pub fn new(config: TfidfConfig) -> Self {
        Self {
            config,
            vocabulary: HashMap::new(),
            terms: Vec::new(),
            idf: Vec::new(),
            n_documents: 0,
        }
    }

    /// Split a normalized document into its terms (unigrams and n-grams).
    ///
    /// Single-character tokens are ignored.
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let tokens: Vec<&str> = document
            .split_whitespace()
            .filter(|t| t.chars().count() >= 2)
            .collect();

        let mut terms = Vec::new();
        for n in self.config.ngram_min..=self.config.ngram_max {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    /// Learn vocabulary and idf weights from a corpus
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        self.config.validate()?;
        if documents.is_empty() {
            return Err(PhishError::InvalidParameter(
                "cannot fit vectorizer on an empty corpus".to_string(),
            ));
        }

        let n_docs = documents.len();
        // term -> (document frequency, corpus frequency)
        let mut stats: HashMap<String, (usize, usize)> = HashMap::new();

        for doc in documents {
            let terms = self.analyze(doc);
            let mut seen = HashSet::new();
            for term in terms {
                let entry = stats.entry(term.clone()).or_insert((0, 0));
                entry.1 += 1;
                if seen.insert(term) {
                    entry.0 += 1;
                }
            }
        }

        let max_doc_count = self.config.max_df * n_docs as f64;
        if max_doc_count < self.config.min_df as f64 {
            return Err(PhishError::InvalidParameter(
                "max_df corresponds to < documents than min_df".to_string(),
            ));
        }

        let mut kept: Vec<(String, usize, usize)> = stats
            .into_iter()
            .filter(|(_, (df, _))| *df >= self.config.min_df && *df as f64 <= max_doc_count)
            .map(|(term, (df, tf))| (term, df, tf))
            .collect();

        if let Some(limit) = self.config.max_features {
            if kept.len() > limit {
                kept.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
                kept.truncate(limit);
            }
        }

        if kept.is_empty() {
            return Err(PhishError::EmptyVocabulary);
        }

        kept.sort_by(|a, b| a.0.cmp(&b.0));

        self.vocabulary.clear();
        self.terms.clear();
        self.idf.clear();
        for (idx, (term, df, _)) in kept.into_iter().enumerate() {
            // smoothed idf: ln((1 + n) / (1 + df)) + 1
            self.idf
                .push(((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0);
            self.vocabulary.insert(term.clone(), idx);
            self.terms.push(term);
        }
        self.n_documents = n_docs;

        Ok(())
    }

    /// Transform one document into a dense TF-IDF row
    pub fn transform(&self, document: &str) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(PhishError::NotFitted("TfidfVectorizer"));
        }

        let mut row = vec![0.0; self.terms.len()];
        for term in self.analyze(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                row[idx] += 1.0;
            }
        }

        for (value, idf) in row.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut row {
                *value /= norm;
            }
        }

        Ok(row)
    }

    /// Fit on a corpus and transform every document
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<Vec<f64>>> {
        self.fit(documents)?;
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    pub fn is_fitted(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Number of columns produced by [`transform`](Self::transform)
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Terms in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Column index of a term
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn config(&self) -> &TfidfConfig {
        &self.config
    }

    /// Number of documents seen while fitting
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(TfidfConfig::default())
    }
}
