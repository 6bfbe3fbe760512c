//! Text preprocessing shared by training and inference

pub mod normalizer;
pub mod stopwords;

pub use normalizer::{Normalizer, EMAIL_PLACEHOLDER, URL_PLACEHOLDER};
