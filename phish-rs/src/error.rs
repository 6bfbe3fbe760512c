use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhishError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("After pruning, no terms remain. Try a lower min_df or a higher max_df.")]
    EmptyVocabulary,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("X has {actual} features, but the fitted state expects {expected} features")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("{0} is not fitted yet")]
    NotFitted(&'static str),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while reading or writing the persisted model artifacts.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Artifact not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to access artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to deserialize artifact {}: {message}", path.display())]
    Deserialize { path: PathBuf, message: String },

    #[error("Failed to serialize artifact {}: {message}", path.display())]
    Serialize { path: PathBuf, message: String },

    #[error("Artifact {} holds a {found}, expected a {expected}", path.display())]
    KindMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("Artifact {} has format version {found}, supported version is {supported}", path.display())]
    VersionMismatch {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    #[error("Artifact {} was produced by a different training run", path.display())]
    SetMismatch { path: PathBuf },

    #[error("Artifact dimensionality mismatch: expected {expected} features, found {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, PhishError>;
