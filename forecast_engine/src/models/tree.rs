//! Regression tree trained by recursive variance-reduction splitting

use crate::features::TrainingExample;
use std::cmp::Ordering;

/// A node in a trained regression tree: a leaf prediction or a binary
/// split on one feature dimension
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionNode {
    /// Terminal prediction value
    Leaf(f64),
    /// Binary split: feature values `<= threshold` go left, `> threshold`
    /// go right
    Internal {
        feature: usize,
        threshold: f64,
        left: Box<DecisionNode>,
        right: Box<DecisionNode>,
    },
}

/// One regression tree, depth-bounded, rebuilt from scratch per forecast
#[derive(Debug, Clone)]
pub struct RegressionTree {
    root: DecisionNode,
    max_depth: usize,
}

impl RegressionTree {
    /// Train a tree on the given examples with the given depth bound
    pub fn fit(examples: &[TrainingExample], max_depth: usize) -> Self {
        let refs: Vec<&TrainingExample> = examples.iter().collect();
        Self {
            root: build(&refs, 0, max_depth),
            max_depth,
        }
    }

    /// Predict by root-to-leaf traversal. Deterministic for a trained tree.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                DecisionNode::Leaf(value) => return *value,
                DecisionNode::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn root(&self) -> &DecisionNode {
        &self.root
    }
}

fn build(examples: &[&TrainingExample], depth: usize, max_depth: usize) -> DecisionNode {
    if depth >= max_depth || examples.len() < 2 {
        return DecisionNode::Leaf(mean_target(examples));
    }

    let n_features = examples[0].features.len();
    let mut best_gain = 0.0;
    let mut best_split: Option<(usize, f64)> = None;

    for feature in 0..n_features {
        // Candidate thresholds: distinct sorted values for this dimension,
        // truncated to the lowest third to bound the split search.
        let mut candidates: Vec<f64> = examples.iter().map(|e| e.features[feature]).collect();
        candidates.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        candidates.dedup();
        candidates.truncate((candidates.len() / 3).max(1));

        for &threshold in &candidates {
            let (left, right) = partition(examples, feature, threshold);
            if left.is_empty() || right.is_empty() {
                continue;
            }

            let gain = variance_reduction(examples, &left, &right);
            if gain > best_gain {
                best_gain = gain;
                best_split = Some((feature, threshold));
            }
        }
    }

    match best_split {
        None => DecisionNode::Leaf(mean_target(examples)),
        Some((feature, threshold)) => {
            let (left, right) = partition(examples, feature, threshold);
            DecisionNode::Internal {
                feature,
                threshold,
                left: Box::new(build(&left, depth + 1, max_depth)),
                right: Box::new(build(&right, depth + 1, max_depth)),
            }
        }
    }
}

fn partition<'a>(
    examples: &[&'a TrainingExample],
    feature: usize,
    threshold: f64,
) -> (Vec<&'a TrainingExample>, Vec<&'a TrainingExample>) {
    examples
        .iter()
        .copied()
        .partition(|e| e.features[feature] <= threshold)
}

/// Mean of the target values, 0 for an empty set
fn mean_target(examples: &[&TrainingExample]) -> f64 {
    if examples.is_empty() {
        return 0.0;
    }
    examples.iter().map(|e| e.target).sum::<f64>() / examples.len() as f64
}

/// Sample variance of the targets, 0 for sets of one or fewer elements
fn target_variance(examples: &[&TrainingExample]) -> f64 {
    if examples.len() < 2 {
        return 0.0;
    }

    let mean = mean_target(examples);
    examples
        .iter()
        .map(|e| (e.target - mean).powi(2))
        .sum::<f64>()
        / (examples.len() - 1) as f64
}

/// Variance reduction achieved by a proposed split:
/// `parent_var - (n_l/n * var_l + n_r/n * var_r)`
fn variance_reduction(
    parent: &[&TrainingExample],
    left: &[&TrainingExample],
    right: &[&TrainingExample],
) -> f64 {
    if parent.is_empty() || left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let n = parent.len() as f64;
    let weighted = left.len() as f64 / n * target_variance(left)
        + right.len() as f64 / n * target_variance(right);
    target_variance(parent) - weighted
}
