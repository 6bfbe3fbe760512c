//! Stratified train/test split

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{PhishError, Result};

/// Row indices of a train/test partition
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split row indices so every class keeps its proportion in both halves.
///
/// Each class sends `round(count * test_size)` rows (at least one) to the
/// test side. Output order is shuffled but fully determined by `seed`.
pub fn stratified_split(labels: &[usize], test_size: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PhishError::InvalidParameter(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }

    let n_classes = labels.iter().copied().max().map_or(0, |m| m + 1);
    let mut by_class: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
    for (i, &label) in labels.iter().enumerate() {
        by_class[label].push(i);
    }

    let populated: Vec<&Vec<usize>> = by_class.iter().filter(|c| !c.is_empty()).collect();
    if populated.len() < 2 {
        return Err(PhishError::Dataset(
            "stratified split needs at least two classes".to_string(),
        ));
    }
    if let Some(smallest) = populated.iter().map(|c| c.len()).min() {
        if smallest < 2 {
            return Err(PhishError::Dataset(
                "The least populated class in y has only 1 member, which is too few".to_string(),
            ));
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for members in by_class.iter_mut().filter(|c| !c.is_empty()) {
        members.shuffle(&mut rng);
        let n_test = ((members.len() as f64 * test_size).round() as usize)
            .clamp(1, members.len() - 1);
        test.extend_from_slice(&members[..n_test]);
        train.extend_from_slice(&members[n_test..]);
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    Ok(TrainTestSplit { train, test })
}
