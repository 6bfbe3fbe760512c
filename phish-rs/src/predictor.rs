//! In-process inference over a loaded artifact set

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::artifacts::ArtifactSet;
use crate::error::{PhishError, Result};
use crate::features::FeatureBuilder;
use crate::model::RandomForest;
use crate::text::Normalizer;

/// Class index of the phishing label
pub const PHISHING_CLASS: usize = 1;

/// Classification of one email text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 1 = phishing, 0 = benign
    pub prediction: u8,
    /// P(phishing) as a percentage, two decimals
    pub probability: f64,
}

/// Immutable normalizer + features + model bundle.
///
/// Holds no interior mutability, so a single instance can serve any
/// number of concurrent requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Predictor {
    normalizer: Normalizer,
    features: FeatureBuilder,
    model: RandomForest,
}

impl Predictor {
    pub fn new(artifacts: ArtifactSet) -> Result<Self> {
        let features = FeatureBuilder::from_parts(artifacts.vectorizer, artifacts.scaler)?;
        if features.n_features() != artifacts.model.n_features() {
            return Err(PhishError::DimensionMismatch {
                expected: features.n_features(),
                actual: artifacts.model.n_features(),
            });
        }
        Ok(Self {
            normalizer: Normalizer::new(),
            features,
            model: artifacts.model,
        })
    }

    /// Load the artifact set stored in `dir`
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::new(ArtifactSet::load(dir)?)
    }

    /// Classify a raw email text
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let normalized = self.normalizer.normalize(text);
        let row = self.features.transform(&normalized)?;
        let proba = self.model.predict_proba(&row)?;
        let p_phishing = proba.get(PHISHING_CLASS).copied().unwrap_or(0.0);

        let class = if p_phishing > proba.first().copied().unwrap_or(0.0) {
            PHISHING_CLASS
        } else {
            0
        };
        debug!("Predicted class {} (p={:.4})", class, p_phishing);

        Ok(Prediction {
            prediction: class as u8,
            probability: round_percent(p_phishing),
        })
    }

    pub fn n_features(&self) -> usize {
        self.features.n_features()
    }
}

/// Probability in [0, 1] as a percentage rounded to two decimals
pub fn round_percent(p: f64) -> f64 {
    (p * 100.0 * 100.0).round() / 100.0
}
