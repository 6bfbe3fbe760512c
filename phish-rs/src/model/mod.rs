//! Ensemble classifier, data splitting and evaluation

pub mod forest;
pub mod metrics;
pub mod split;
pub mod tree;

pub use forest::{ForestConfig, RandomForest};
pub use metrics::{accuracy, ClassificationReport};
pub use split::{stratified_split, TrainTestSplit};
pub use tree::DecisionTree;
