//! Lexicon-based sentiment scoring
//!
//! Produces a compound polarity in [-1, 1] for a normalized token string.
//! Per-token valences come from [`lexicon`](super::lexicon); boosters and
//! negators within the three preceding tokens adjust them, and a "but"
//! shifts weight towards the clause after it.

use std::collections::{HashMap, HashSet};

use super::lexicon;

const BOOSTER_INCR: f64 = 0.293;
const BOOSTER_DECR: f64 = -0.293;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Stateless compound sentiment scorer, safe to share between threads
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        let valences = lexicon::VALENCES.iter().copied().collect();
        let boosters = lexicon::BOOSTERS_INCR
            .iter()
            .map(|w| (*w, BOOSTER_INCR))
            .chain(lexicon::BOOSTERS_DECR.iter().map(|w| (*w, BOOSTER_DECR)))
            .collect();
        let negations = lexicon::NEGATIONS.iter().copied().collect();

        Self {
            valences,
            boosters,
            negations,
        }
    }

    /// Compound polarity of a text, rounded to 4 decimals
    pub fn compound(&self, text: &str) -> f64 {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut sentiments: Vec<f64> = tokens
            .iter()
            .enumerate()
            .map(|(i, _)| self.token_valence(&tokens, i))
            .collect();

        if let Some(but_idx) = tokens.iter().position(|t| *t == "but") {
            for (i, s) in sentiments.iter_mut().enumerate() {
                if i < but_idx {
                    *s *= 0.5;
                } else if i > but_idx {
                    *s *= 1.5;
                }
            }
        }

        let sum: f64 = sentiments.iter().sum();
        let compound = normalize(sum);
        (compound * 10_000.0).round() / 10_000.0
    }

    /// Valence of one token after booster and negation adjustments
    fn token_valence(&self, tokens: &[&str], i: usize) -> f64 {
        let word = tokens[i];
        if self.boosters.contains_key(word) {
            return 0.0;
        }
        let Some(&base) = self.valences.get(word) else {
            return 0.0;
        };

        let mut valence = base;
        for distance in 1..=3 {
            if i < distance {
                break;
            }
            let previous = tokens[i - distance];
            if self.valences.contains_key(previous) {
                continue;
            }

            if let Some(&scalar) = self.boosters.get(previous) {
                let mut boost = if valence < 0.0 { -scalar } else { scalar };
                match distance {
                    2 => boost *= 0.95,
                    3 => boost *= 0.9,
                    _ => {}
                }
                valence += boost;
            }

            if self.negations.contains(previous) {
                valence *= NEGATION_SCALAR;
            }
        }
        valence
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(score: f64) -> f64 {
    let norm = score / (score * score + NORMALIZATION_ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}
