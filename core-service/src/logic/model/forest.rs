//! Random forest classifier
//!
//! Bagged `linfa-trees` CART trees (Gini impurity). Each tree is fitted on a
//! bootstrap sample drawn with its own seed, and every tree seed is drawn from
//! the forest seed, so the same data and params always grow the same forest.
//! Prediction is the share of tree votes per class; the arg-max wins and the
//! lowest class index breaks ties.

use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::error::ModelError;
use crate::constants::{DEFAULT_MIN_SAMPLES_SPLIT, DEFAULT_N_ESTIMATORS, DEFAULT_SEED};
use crate::logic::features::FEATURE_COUNT;

/// Training matrix row
pub type Row = [f64; FEATURE_COUNT];

/// One member of the ensemble
pub type Tree = DecisionTree<f64, usize>;

/// Forest hyper-parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: DEFAULT_N_ESTIMATORS,
            max_depth: None,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            bootstrap: true,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    params: ForestParams,
    n_classes: usize,
    trees: Vec<Tree>,
}

impl RandomForest {
    /// Fit a forest on rows `x` with ordinal labels `y` in `0..n_classes`
    pub fn fit(x: &[Row], y: &[usize], n_classes: usize, params: ForestParams) -> Result<Self, ModelError> {
        if x.is_empty() {
            return Err(ModelError::InvalidTrainingData("no training rows".to_string()));
        }
        if x.len() != y.len() {
            return Err(ModelError::InvalidTrainingData(format!(
                "{} rows but {} labels",
                x.len(),
                y.len()
            )));
        }
        if params.n_estimators == 0 {
            return Err(ModelError::InvalidTrainingData("n_estimators must be > 0".to_string()));
        }
        if let Some(bad) = y.iter().find(|label| **label >= n_classes) {
            return Err(ModelError::InvalidTrainingData(format!(
                "label {} outside 0..{}",
                bad, n_classes
            )));
        }
        if x.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ModelError::InvalidTrainingData("non-finite feature value".to_string()));
        }

        let n = x.len();
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.n_estimators);

        for _ in 0..params.n_estimators {
            let mut tree_rng = StdRng::seed_from_u64(rng.gen::<u64>());
            let samples: Vec<usize> = if params.bootstrap {
                (0..n).map(|_| tree_rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };

            let records = to_matrix(samples.iter().map(|&i| &x[i]));
            let targets: Array1<usize> = samples.iter().map(|&i| y[i]).collect();
            let dataset = Dataset::new(records, targets);

            let tree = Tree::params()
                .split_quality(SplitQuality::Gini)
                .max_depth(params.max_depth)
                .min_weight_split(params.min_samples_split.max(2) as f32)
                .fit(&dataset)
                .map_err(|e| ModelError::InvalidTrainingData(e.to_string()))?;
            trees.push(tree);
        }

        Ok(Self { params, n_classes, trees })
    }

    /// Share of tree votes per class
    pub fn predict_proba(&self, row: &Row) -> Vec<f64> {
        self.vote_shares(&to_matrix(std::iter::once(row)))
            .pop()
            .unwrap_or_else(|| vec![0.0; self.n_classes])
    }

    /// Most probable class index
    pub fn predict(&self, row: &Row) -> usize {
        argmax(&self.predict_proba(row))
    }

    /// Accuracy on a labeled set; 0.0 for an empty set
    pub fn score(&self, x: &[Row], y: &[usize]) -> f64 {
        if x.is_empty() {
            return 0.0;
        }
        let correct = self
            .vote_shares(&to_matrix(x))
            .iter()
            .zip(y)
            .filter(|(shares, label)| argmax(shares) == **label)
            .count();
        correct as f64 / x.len() as f64
    }

    /// Structural check of every tree.
    ///
    /// Split features must exist in the layout, thresholds must be finite,
    /// split nodes must have both children and leaves must predict a class
    /// below `n_classes`. Prediction on a forest that passes cannot index
    /// out of bounds.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::EmptyForest);
        }

        for (index, tree) in self.trees.iter().enumerate() {
            let malformed = |reason: String| ModelError::MalformedTree { tree: index, reason };

            for node in tree.iter_nodes() {
                if node.is_leaf() {
                    match node.prediction() {
                        Some(class) if class < self.n_classes => {}
                        other => {
                            return Err(malformed(format!(
                                "leaf predicts {:?}, expected a class below {}",
                                other, self.n_classes
                            )))
                        }
                    }
                    continue;
                }

                let (feature, threshold, _) = node.split();
                if feature >= FEATURE_COUNT {
                    return Err(malformed(format!(
                        "split on feature {} of {}",
                        feature, FEATURE_COUNT
                    )));
                }
                if !threshold.is_finite() {
                    return Err(malformed(format!("non-finite threshold on feature {}", feature)));
                }
                if node.children().iter().any(|child| child.is_none()) {
                    return Err(malformed("split node without both children".to_string()));
                }
            }
        }

        Ok(())
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn vote_shares(&self, records: &Array2<f64>) -> Vec<Vec<f64>> {
        let mut shares = vec![vec![0.0f64; self.n_classes]; records.nrows()];

        for tree in &self.trees {
            let votes: Array1<usize> = tree.predict(records);
            for (row, class) in shares.iter_mut().zip(votes.iter()) {
                if let Some(slot) = row.get_mut(*class) {
                    *slot += 1.0;
                }
            }
        }

        let n_trees = self.trees.len().max(1) as f64;
        for row in &mut shares {
            row.iter_mut().for_each(|p| *p /= n_trees);
        }
        shares
    }
}

fn to_matrix<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Array2<f64> {
    let flat: Vec<f64> = rows.into_iter().flatten().copied().collect();
    let n = flat.len() / FEATURE_COUNT;
    Array2::from_shape_vec((n, FEATURE_COUNT), flat)
        .unwrap_or_else(|_| Array2::zeros((0, FEATURE_COUNT)))
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}
