//! CART decision tree (gini impurity)
//!
//! Nodes live in a flat arena so fitted trees serialize compactly and
//! prediction does not recurse.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::features::FeatureMatrix;

/// Minimum impurity decrease for a split to count
const MIN_GAIN: f64 = 1e-12;

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth (None = grow until leaves are pure)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in each child
    pub min_samples_leaf: usize,
    /// Non-constant features to examine per split
    pub max_features: usize,
}

/// Tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        /// Class distribution of the training samples that reached the leaf
        proba: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Fitted decision tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_classes: usize,
}

struct Candidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

impl DecisionTree {
    /// Grow a tree on the rows of `x` selected by `indices`.
    ///
    /// `indices` may contain duplicates (bootstrap samples). Returns the
    /// tree and the total impurity decrease attributed to each feature.
    pub fn fit(
        x: &FeatureMatrix,
        labels: &[usize],
        n_classes: usize,
        indices: Vec<usize>,
        config: &TreeConfig,
        rng: &mut ChaCha8Rng,
    ) -> (Self, Vec<f64>) {
        let n_features = x.n_cols();
        let mut importances = vec![0.0; n_features];
        let mut feature_order: Vec<usize> = (0..n_features).collect();
        let mut nodes: Vec<Node> = Vec::new();
        let total = indices.len().max(1) as f64;

        // (node slot, sample indices, depth)
        nodes.push(Node::Leaf { proba: Vec::new() });
        let mut stack = vec![(0usize, indices, 0usize)];

        while let Some((slot, idx, depth)) = stack.pop() {
            let counts = class_counts(labels, &idx, n_classes);
            let impurity = gini(&counts, idx.len());

            let depth_reached = config.max_depth.is_some_and(|d| depth >= d);
            let splittable = !depth_reached
                && idx.len() >= config.min_samples_split
                && idx.len() >= 2 * config.min_samples_leaf
                && impurity > MIN_GAIN;

            let best = if splittable {
                best_split(
                    x,
                    labels,
                    n_classes,
                    &idx,
                    impurity,
                    config,
                    &mut feature_order,
                    rng,
                )
            } else {
                None
            };

            match best {
                Some(split) => {
                    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = idx
                        .iter()
                        .partition(|&&i| x.row(i)[split.feature] <= split.threshold);

                    importances[split.feature] +=
                        (idx.len() as f64 * (impurity - split.impurity)) / total;

                    let left = nodes.len();
                    nodes.push(Node::Leaf { proba: Vec::new() });
                    let right = nodes.len();
                    nodes.push(Node::Leaf { proba: Vec::new() });

                    nodes[slot] = Node::Split {
                        feature: split.feature,
                        threshold: split.threshold,
                        left,
                        right,
                    };
                    stack.push((right, right_idx, depth + 1));
                    stack.push((left, left_idx, depth + 1));
                }
                None => {
                    let n = idx.len().max(1) as f64;
                    nodes[slot] = Node::Leaf {
                        proba: counts.iter().map(|&c| c as f64 / n).collect(),
                    };
                }
            }
        }

        (Self { nodes, n_classes }, importances)
    }

    /// Class distribution of the leaf reached by `row`
    pub fn predict_proba(&self, row: &[f64]) -> &[f64] {
        let mut current = 0;
        loop {
            match &self.nodes[current] {
                Node::Leaf { proba } => return proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    current = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }
}

fn class_counts(labels: &[usize], idx: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0; n_classes];
    for &i in idx {
        counts[labels[i]] += 1;
    }
    counts
}

fn gini(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

/// Search for the split with the lowest weighted child impurity.
///
/// Features are drawn without replacement; constant features do not count
/// towards `max_features`, so sparse columns do not starve the search.
#[allow(clippy::too_many_arguments)]
fn best_split(
    x: &FeatureMatrix,
    labels: &[usize],
    n_classes: usize,
    idx: &[usize],
    parent_impurity: f64,
    config: &TreeConfig,
    feature_order: &mut [usize],
    rng: &mut ChaCha8Rng,
) -> Option<Candidate> {
    let n_features = feature_order.len();
    let n = idx.len();
    let mut best: Option<Candidate> = None;
    let mut examined = 0;
    let mut values: Vec<(f64, usize)> = Vec::with_capacity(n);

    for drawn in 0..n_features {
        if examined >= config.max_features {
            break;
        }
        let pick = rng.gen_range(drawn..n_features);
        feature_order.swap(drawn, pick);
        let feature = feature_order[drawn];

        values.clear();
        values.extend(idx.iter().map(|&i| (x.row(i)[feature], labels[i])));
        values.sort_by(|a, b| a.0.total_cmp(&b.0));

        if values[n - 1].0 <= values[0].0 {
            continue;
        }
        examined += 1;

        let mut left_counts = vec![0usize; n_classes];
        let mut right_counts = vec![0usize; n_classes];
        for &(_, label) in &values {
            right_counts[label] += 1;
        }

        for pos in 0..n - 1 {
            let (value, label) = values[pos];
            left_counts[label] += 1;
            right_counts[label] -= 1;

            let n_left = pos + 1;
            let n_right = n - n_left;
            let next = values[pos + 1].0;
            if next <= value {
                continue;
            }
            if n_left < config.min_samples_leaf || n_right < config.min_samples_leaf {
                continue;
            }

            let weighted = (n_left as f64 * gini(&left_counts, n_left)
                + n_right as f64 * gini(&right_counts, n_right))
                / n as f64;

            if parent_impurity - weighted > MIN_GAIN
                && best.as_ref().map_or(true, |b| weighted < b.impurity)
            {
                let mut threshold = value + (next - value) / 2.0;
                if threshold >= next {
                    threshold = value;
                }
                best = Some(Candidate {
                    feature,
                    threshold,
                    impurity: weighted,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn config(max_features: usize) -> TreeConfig {
        TreeConfig {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features,
        }
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini(&[5, 5], 10), 0.5);
        assert_eq!(gini(&[10, 0], 10), 0.0);
        assert_eq!(gini(&[0, 0], 0), 0.0);
    }

    #[test]
    fn test_separable_data() {
        let x = FeatureMatrix::from_rows(vec![
            vec![0.0, 1.0],
            vec![0.1, 1.0],
            vec![0.2, 1.0],
            vec![0.9, 1.0],
            vec![1.0, 1.0],
            vec![1.1, 1.0],
        ])
        .unwrap();
        let labels = vec![0, 0, 0, 1, 1, 1];
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let (tree, importances) =
            DecisionTree::fit(&x, &labels, 2, (0..6).collect(), &config(2), &mut rng);

        assert_eq!(tree.predict_proba(&[0.05, 1.0]), &[1.0, 0.0]);
        assert_eq!(tree.predict_proba(&[1.05, 1.0]), &[0.0, 1.0]);
        assert_eq!(tree.n_leaves(), 2);
        // constant second column never used
        assert_eq!(importances[1], 0.0);
        assert!(importances[0] > 0.0);
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let x = FeatureMatrix::from_rows(vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        let labels = vec![0, 1, 0, 1];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cfg = TreeConfig {
            max_depth: Some(0),
            ..config(1)
        };

        let (tree, _) = DecisionTree::fit(&x, &labels, 2, (0..4).collect(), &cfg, &mut rng);
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.predict_proba(&[2.0]), &[0.5, 0.5]);
    }

    #[test]
    fn test_pure_node_is_leaf() {
        let x = FeatureMatrix::from_rows(vec![vec![0.0], vec![1.0]]).unwrap();
        let labels = vec![1, 1];
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let (tree, _) = DecisionTree::fit(&x, &labels, 2, vec![0, 1], &config(1), &mut rng);
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.predict_proba(&[0.0]), &[0.0, 1.0]);
    }
}
