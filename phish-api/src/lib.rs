//! phish-api: HTTP inference service for the phishing classifier
//!
//! Loads one artifact set at startup and answers `POST /predict` with
//! `{"prediction": 0|1, "probability": <percent>}`.
//!
//! # Modules
//!
//! - [`config`]: Service configuration
//! - [`error`]: Error types and their HTTP mapping
//! - [`handlers`]: Request handlers and shared state
//! - [`server`]: Router and listener

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::ServiceConfig;
pub use error::{PredictError, Result};
pub use handlers::AppState;
pub use server::{router, PredictServer};
