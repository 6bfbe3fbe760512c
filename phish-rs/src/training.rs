//! Offline training pipeline
//!
//! load → normalize → features → split → forest → persist → evaluate.
//! Artifacts are written whatever the hold-out accuracy turns out to be;
//! the caller decides what to do with the report.

use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::artifacts::{ArtifactPaths, ArtifactSet};
use crate::config::TrainingConfig;
use crate::dataset;
use crate::error::Result;
use crate::features::FeatureBuilder;
use crate::model::{stratified_split, ClassificationReport, RandomForest};
use crate::text::Normalizer;

/// Number of most important terms written to the log
const TOP_TERMS: usize = 10;

/// One held-out prediction shown after evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewRow {
    pub actual: usize,
    pub predicted: usize,
    /// P(phishing) in [0, 1]
    pub confidence: f64,
}

/// Outcome of a training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub set_id: Uuid,
    pub n_examples: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub vocabulary_size: usize,
    pub n_features: usize,
    pub accuracy: f64,
    pub report: ClassificationReport,
    pub preview: Vec<PreviewRow>,
    #[serde(skip)]
    pub artifacts: ArtifactPaths,
}

impl TrainingReport {
    /// Pretty-printed JSON summary (artifact paths excluded)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run the full pipeline with `config`
pub fn run(config: &TrainingConfig) -> Result<TrainingReport> {
    config.validate()?;
    let started = Instant::now();

    // Load
    let examples = dataset::load_all(&config.datasets)?;
    let n_phishing = examples.iter().filter(|e| e.is_phishing()).count();
    info!(
        "Total rows: {} ({} phishing, {} benign)",
        examples.len(),
        n_phishing,
        examples.len() - n_phishing
    );

    // Normalize
    let stage = Instant::now();
    let normalizer = Normalizer::new();
    let corpus: Vec<String> = examples
        .par_iter()
        .map(|e| normalizer.normalize_email(&e.subject, &e.body))
        .collect();
    let labels: Vec<usize> = examples.iter().map(|e| e.label as usize).collect();
    info!("Normalized {} emails in {:?}", corpus.len(), stage.elapsed());

    // Features
    let stage = Instant::now();
    let mut builder = FeatureBuilder::new(config.tfidf.clone());
    let matrix = builder.fit(&corpus)?;
    info!(
        "Built {}x{} feature matrix in {:?}",
        matrix.n_rows(),
        matrix.n_cols(),
        stage.elapsed()
    );

    // Split
    let split = stratified_split(&labels, config.split.test_size, config.split.seed)?;
    info!("Split: {} train, {} test", split.train.len(), split.test.len());
    let x_train = matrix.select(&split.train);
    let y_train: Vec<usize> = split.train.iter().map(|&i| labels[i]).collect();
    let x_test = matrix.select(&split.test);
    let y_test: Vec<usize> = split.test.iter().map(|&i| labels[i]).collect();

    // Fit
    let stage = Instant::now();
    let model = RandomForest::fit(config.forest.clone(), &x_train, &y_train)?;
    info!("Trained {} trees in {:?}", model.n_trees(), stage.elapsed());

    // Persist
    let (vectorizer, scaler) = builder.into_parts();
    let set = ArtifactSet::new(vectorizer, scaler, model)?;
    let artifacts = set.save(&config.output_dir)?;
    log_top_terms(&set);

    // Evaluate
    let predictions = set.model.predict_matrix(&x_test)?;
    let y_pred: Vec<usize> = predictions.iter().map(|(class, _)| *class).collect();
    let report = ClassificationReport::new(&y_test, &y_pred);
    info!("Accuracy: {:.4}", report.accuracy);
    info!("Classification Report:\n{}", report);

    let preview: Vec<PreviewRow> = y_test
        .iter()
        .zip(&predictions)
        .take(config.preview_rows)
        .map(|(&actual, &(predicted, confidence))| PreviewRow {
            actual,
            predicted,
            confidence,
        })
        .collect();
    for row in &preview {
        info!(
            "Actual: {}  Predicted: {}  Confidence: {:.4}",
            row.actual, row.predicted, row.confidence
        );
    }

    // TODO: add a minimum-accuracy gate before overwriting the previous artifact set
    warn!("No quality gate applied: artifacts written regardless of accuracy");
    info!("Training finished in {:?}", started.elapsed());

    Ok(TrainingReport {
        set_id: set.set_id,
        n_examples: examples.len(),
        n_train: split.train.len(),
        n_test: split.test.len(),
        vocabulary_size: set.vectorizer.vocabulary_size(),
        n_features: set.model.n_features(),
        accuracy: report.accuracy,
        report,
        preview,
        artifacts,
    })
}

fn log_top_terms(set: &ArtifactSet) {
    let terms = set.vectorizer.terms();
    let mut ranked: Vec<(usize, f64)> = set
        .model
        .feature_importances()
        .iter()
        .copied()
        .enumerate()
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    for (index, importance) in ranked.into_iter().take(TOP_TERMS) {
        let name = terms.get(index).map(String::as_str).unwrap_or("<sentiment>");
        debug!("Feature importance {:.4}: {}", importance, name);
    }
}
