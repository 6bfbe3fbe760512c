//! Request handlers

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use phish_rs::{Prediction, Predictor};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::{PredictError, Result};

/// Shared, read-only service state
pub struct AppState {
    /// Loaded predictor, or the reason loading failed
    pub predictor: std::result::Result<Arc<Predictor>, String>,
}

impl AppState {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor: Ok(Arc::new(predictor)),
        }
    }

    /// State whose predictor failed to load
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            predictor: Err(reason.into()),
        }
    }

    /// Load the artifact set from `dir`. A failure is logged and kept so
    /// that every prediction request reports it.
    pub fn load<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        match Predictor::load(dir) {
            Ok(predictor) => {
                info!(
                    "Model loaded from {} ({} features)",
                    dir.display(),
                    predictor.n_features()
                );
                Self::new(predictor)
            }
            Err(e) => {
                error!("Error loading model or vectorizer: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.predictor.is_ok()
    }
}

/// POST /predict - Classify one email text
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Prediction>> {
    let text =
        extract_text(&body).inspect_err(|e| warn!("Rejected prediction request: {}", e))?;

    let predictor = state
        .predictor
        .as_ref()
        .map_err(|reason| PredictError::Model(reason.clone()))?
        .clone();

    let prediction = tokio::task::spawn_blocking(move || predictor.predict(&text))
        .await
        .map_err(|e| PredictError::Internal(e.to_string()))?
        .map_err(|e| {
            error!("Prediction failed: {}", e);
            PredictError::from(e)
        })?;

    debug!(
        "Prediction {} ({}%)",
        prediction.prediction, prediction.probability
    );
    Ok(Json(prediction))
}

/// Pull the `text` field out of a raw JSON body
fn extract_text(body: &[u8]) -> Result<String> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| PredictError::Internal(e.to_string()))?;

    let object = value.as_object().ok_or_else(|| {
        PredictError::Internal("request body must be a JSON object".to_string())
    })?;

    match object.get("text") {
        None => Err(PredictError::MissingField("text".to_string())),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(PredictError::Internal(
            "field 'text' must be a string".to_string(),
        )),
    }
}

/// GET /health - Service and model status
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let loaded = state.model_loaded();
    let status = if loaded { "healthy" } else { "degraded" };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": status,
            "service": "phish-api",
            "version": env!("CARGO_PKG_VERSION"),
            "model_loaded": loaded,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text() {
        assert_eq!(extract_text(br#"{"text": "hello"}"#).unwrap(), "hello");
        assert_eq!(
            extract_text(br#"{"text": "", "extra": 1}"#).unwrap(),
            ""
        );
    }

    #[test]
    fn test_extract_text_missing_field() {
        let err = extract_text(br#"{"body": "hello"}"#).unwrap_err();
        assert!(matches!(err, PredictError::MissingField(_)));
    }

    #[test]
    fn test_extract_text_malformed() {
        let bodies: [&[u8]; 4] = [b"not json", b"[1, 2]", br#"{"text": 42}"#, b""];
        for body in bodies {
            let err = extract_text(body).unwrap_err();
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_unavailable_state() {
        let state = AppState::unavailable("Artifact not found: ./scaler.bin");
        assert!(!state.model_loaded());
    }
}
