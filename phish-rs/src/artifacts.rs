//! Model artifact persistence
//!
//! A training run writes three files that only make sense together:
//! the TF-IDF vectorizer, the scaler and the forest. Each file starts with
//! a small header (format version, artifact kind, training-run id) followed
//! by the bincode payload. Loading checks that all three headers agree and
//! that the dimensions line up before anything is handed to the predictor.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ArtifactError;
use crate::features::{StandardScaler, TfidfVectorizer};
use crate::model::RandomForest;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

pub const VECTORIZER_FILE: &str = "phishing_tfidf_vectorizer.bin";
pub const SCALER_FILE: &str = "scaler.bin";
pub const MODEL_FILE: &str = "phishing_model.bin";

type ArtifactResult<T> = std::result::Result<T, ArtifactError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    Vectorizer,
    Scaler,
    Model,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Vectorizer => write!(f, "vectorizer"),
            ArtifactKind::Scaler => write!(f, "scaler"),
            ArtifactKind::Model => write!(f, "model"),
        }
    }
}

/// Header written in front of every artifact payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactHeader {
    pub format_version: u32,
    pub kind: ArtifactKind,
    pub set_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Locations of the three artifact files
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub vectorizer: PathBuf,
    pub scaler: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            vectorizer: dir.join(VECTORIZER_FILE),
            scaler: dir.join(SCALER_FILE),
            model: dir.join(MODEL_FILE),
        }
    }
}

/// The matched vectorizer/scaler/model triple of one training run
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub set_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub vectorizer: TfidfVectorizer,
    pub scaler: StandardScaler,
    pub model: RandomForest,
}

impl ArtifactSet {
    /// Bundle freshly fitted parts under a new set id
    pub fn new(
        vectorizer: TfidfVectorizer,
        scaler: StandardScaler,
        model: RandomForest,
    ) -> ArtifactResult<Self> {
        check_dimensions(&vectorizer, &scaler, &model)?;
        Ok(Self {
            set_id: Uuid::new_v4(),
            created_at: Utc::now(),
            vectorizer,
            scaler,
            model,
        })
    }

    /// Write all three artifacts into `dir`, replacing any previous set
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> ArtifactResult<ArtifactPaths> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| ArtifactError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let paths = ArtifactPaths::in_dir(dir);
        self.write(&paths.vectorizer, ArtifactKind::Vectorizer, &self.vectorizer)?;
        self.write(&paths.scaler, ArtifactKind::Scaler, &self.scaler)?;
        self.write(&paths.model, ArtifactKind::Model, &self.model)?;

        info!("Saved artifact set {} to {}", self.set_id, dir.display());
        Ok(paths)
    }

    /// Load and cross-check the artifact set stored in `dir`
    pub fn load<P: AsRef<Path>>(dir: P) -> ArtifactResult<Self> {
        let paths = ArtifactPaths::in_dir(dir);

        let (header, vectorizer): (_, TfidfVectorizer) =
            read_artifact(&paths.vectorizer, ArtifactKind::Vectorizer)?;
        let (scaler_header, scaler): (_, StandardScaler) =
            read_artifact(&paths.scaler, ArtifactKind::Scaler)?;
        let (model_header, model): (_, RandomForest) =
            read_artifact(&paths.model, ArtifactKind::Model)?;

        if scaler_header.set_id != header.set_id {
            return Err(ArtifactError::SetMismatch { path: paths.scaler });
        }
        if model_header.set_id != header.set_id {
            return Err(ArtifactError::SetMismatch { path: paths.model });
        }
        check_dimensions(&vectorizer, &scaler, &model)?;

        info!(
            "Loaded artifact set {} (trained {}, {} features)",
            header.set_id,
            header.created_at,
            model.n_features()
        );

        Ok(Self {
            set_id: header.set_id,
            created_at: header.created_at,
            vectorizer,
            scaler,
            model,
        })
    }

    fn write<T: Serialize>(&self, path: &Path, kind: ArtifactKind, payload: &T) -> ArtifactResult<()> {
        let header = ArtifactHeader {
            format_version: FORMAT_VERSION,
            kind,
            set_id: self.set_id,
            created_at: self.created_at,
        };

        // write next to the target, then rename over it
        let tmp = path.with_extension("bin.tmp");
        let io_err = |source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        };
        let ser_err = |e: bincode::Error| ArtifactError::Serialize {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let file = File::create(&tmp).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, &header).map_err(ser_err)?;
        bincode::serialize_into(&mut writer, payload).map_err(ser_err)?;
        writer.flush().map_err(io_err)?;
        drop(writer);
        fs::rename(&tmp, path).map_err(io_err)?;

        debug!("Wrote {} artifact to {}", kind, path.display());
        Ok(())
    }
}

fn read_artifact<T: DeserializeOwned>(
    path: &Path,
    expected: ArtifactKind,
) -> ArtifactResult<(ArtifactHeader, T)> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ArtifactError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let mut reader = BufReader::new(file);
    let de_err = |e: bincode::Error| ArtifactError::Deserialize {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let header: ArtifactHeader = bincode::deserialize_from(&mut reader).map_err(de_err)?;
    if header.format_version != FORMAT_VERSION {
        return Err(ArtifactError::VersionMismatch {
            path: path.to_path_buf(),
            found: header.format_version,
            supported: FORMAT_VERSION,
        });
    }
    if header.kind != expected {
        return Err(ArtifactError::KindMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            found: header.kind.to_string(),
        });
    }

    let payload: T = bincode::deserialize_from(&mut reader).map_err(de_err)?;
    Ok((header, payload))
}

fn check_dimensions(
    vectorizer: &TfidfVectorizer,
    scaler: &StandardScaler,
    model: &RandomForest,
) -> ArtifactResult<()> {
    let expected = vectorizer.vocabulary_size() + 1;
    if scaler.n_features() != expected {
        return Err(ArtifactError::DimensionMismatch {
            expected,
            actual: scaler.n_features(),
        });
    }
    if model.n_features() != expected {
        return Err(ArtifactError::DimensionMismatch {
            expected,
            actual: model.n_features(),
        });
    }
    Ok(())
}
