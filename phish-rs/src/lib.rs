//! phish-rs: Phishing email classifier
//!
//! Everything needed to train the classifier offline and to score single
//! emails in-process.
//!
//! # Pipeline
//!
//! - **Normalization**: lowercase, URL/email placeholders, punctuation and
//!   stopword removal
//! - **Features**: TF-IDF over unigrams and bigrams, one sentiment column,
//!   standardization
//! - **Model**: random forest with seeded, reproducible training
//! - **Artifacts**: vectorizer, scaler and model persisted as one matched set
//!
//! # Example
//!
//! ```no_run
//! use phish_rs::Predictor;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let predictor = Predictor::load(".")?;
//!     let result = predictor.predict("Verify your account at http://example.com")?;
//!     println!("{} ({}%)", result.prediction, result.probability);
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`text`]: Text normalization
//! - [`features`]: TF-IDF, sentiment and scaling
//! - [`model`]: Random forest, split and metrics
//! - [`artifacts`]: Artifact persistence
//! - [`training`]: Offline training pipeline
//! - [`predictor`]: Inference over a loaded artifact set

pub mod artifacts;
pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod model;
pub mod predictor;
pub mod text;
pub mod training;

// Re-export commonly used types
pub use artifacts::ArtifactSet;
pub use config::TrainingConfig;
pub use error::{ArtifactError, PhishError, Result};
pub use predictor::{Prediction, Predictor};
pub use training::TrainingReport;
