//! Bootstrap-aggregated ensemble of regression trees

use crate::features::TrainingExample;
use crate::models::tree::RegressionTree;
use rand::Rng;
use tracing::debug;

/// Default number of trees in the ensemble
pub const DEFAULT_TREES: usize = 10;
/// Default depth bound per tree
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Ensemble of independently trained regression trees.
///
/// Each tree is fit on a bootstrap resample (same size as the original set,
/// drawn uniformly with replacement); prediction is the arithmetic mean over
/// all trees. The random source is passed in explicitly so fits are
/// reproducible under a fixed seed.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// Train `n_trees` trees on bootstrap resamples of `examples`.
    ///
    /// Callers are expected to skip fitting below 3 training examples and
    /// mark the forest unavailable; an empty input yields an empty forest
    /// rather than a panic.
    pub fn fit<R: Rng>(
        examples: &[TrainingExample],
        n_trees: usize,
        max_depth: usize,
        rng: &mut R,
    ) -> Self {
        if examples.is_empty() {
            return Self { trees: Vec::new() };
        }

        let trees = (0..n_trees)
            .map(|_| {
                let sample: Vec<TrainingExample> = (0..examples.len())
                    .map(|_| examples[rng.gen_range(0..examples.len())].clone())
                    .collect();
                RegressionTree::fit(&sample, max_depth)
            })
            .collect();

        debug!(
            n_trees,
            max_depth,
            examples = examples.len(),
            "fitted bootstrap forest"
        );
        Self { trees }
    }

    /// Mean prediction over all trees; 0 for an empty forest
    pub fn predict(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }

        self.trees
            .iter()
            .map(|tree| tree.predict(features))
            .sum::<f64>()
            / self.trees.len() as f64
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
