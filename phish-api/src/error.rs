use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Fixed summary attached to every failed prediction
pub const PREDICTION_FAILED: &str = "Error processing email prediction";

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Missing required field: '{0}'")]
    MissingField(String),

    #[error("{0}")]
    Model(String),

    #[error("{0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PredictError {
    pub fn status(&self) -> StatusCode {
        match self {
            PredictError::MissingField(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Response with error details
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiError {
            error: self.to_string(),
            message: PREDICTION_FAILED.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<phish_rs::PhishError> for PredictError {
    fn from(e: phish_rs::PhishError) -> Self {
        PredictError::Model(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;
