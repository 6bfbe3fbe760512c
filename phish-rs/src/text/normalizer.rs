//! Text normalization
//!
//! Turns raw email text into the token string every downstream stage
//! consumes. Training and inference must both go through [`Normalizer`],
//! otherwise the fitted vocabulary no longer lines up with the input.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::stopwords;

/// Token substituted for every URL
pub const URL_PLACEHOLDER: &str = "urlplaceholder";
/// Token substituted for every email address
pub const EMAIL_PLACEHOLDER: &str = "emailplaceholder";

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("URL pattern is valid"));
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S*@\S*").expect("email pattern is valid"));

/// Deterministic raw text -> normalized token string transform
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: HashSet<String>,
}

impl Normalizer {
    /// Create a normalizer with the English stopword list
    pub fn new() -> Self {
        Self::with_stopwords(stopwords::english())
    }

    /// Create a normalizer with a custom stopword set
    pub fn with_stopwords(stopwords: HashSet<String>) -> Self {
        Self { stopwords }
    }

    /// Normalize a piece of text.
    ///
    /// Steps run in a fixed order: lowercase, URL substitution, email
    /// substitution, removal of everything but ASCII letters, digits and
    /// whitespace, whitespace tokenization, stopword removal. Surviving
    /// tokens are joined with single spaces.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let no_urls = URL_REGEX.replace_all(&lowered, URL_PLACEHOLDER);
        let no_emails = EMAIL_REGEX.replace_all(&no_urls, EMAIL_PLACEHOLDER);

        let cleaned: String = no_emails
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| !self.stopwords.contains(*token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Normalize subject and body separately and join them, the way
    /// training examples are combined.
    pub fn normalize_email(&self, subject: &str, body: &str) -> String {
        format!("{} {}", self.normalize(subject), self.normalize(body))
    }

    /// Check whether a token is a stopword
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
