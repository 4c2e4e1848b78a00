//! Depth-limited CART decision trees.
//!
//! Nodes are grown greedily: at every node each feature is scanned in sorted
//! order and the threshold with the largest impurity decrease is kept. Gini
//! impurity drives the classifier, variance drives the regressor. Samples
//! with `x <= threshold` go to the left child.

use crate::config::params::{Params, ParamsExt};
use crate::core::constants::{DEFAULT_MIN_SAMPLES_SPLIT, IMPURITY_EPSILON};
use crate::core::error::{CrossValError, Result};
use crate::core::traits::{Estimator, FromParams};
use crate::core::types::*;
use crate::estimators::check_training_data;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Hyper-parameters shared by both tree estimators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum depth of the tree; unlimited when `None`
    pub max_depth: Option<usize>,
    /// Minimum number of samples required to split a node
    pub min_samples_split: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        TreeParams {
            max_depth: None,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
        }
    }
}

impl TreeParams {
    const KNOWN: [&'static str; 2] = ["max_depth", "min_samples_split"];

    /// Read tree settings from a parameter map.
    pub fn from_params(params: &Params) -> Result<Self> {
        params.reject_unknown(&Self::KNOWN)?;

        let defaults = TreeParams::default();
        let tree_params = TreeParams {
            max_depth: params.usize_param("max_depth")?,
            min_samples_split: params
                .usize_param("min_samples_split")?
                .unwrap_or(defaults.min_samples_split),
        };
        tree_params.validate()?;
        Ok(tree_params)
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == Some(0) {
            return Err(CrossValError::invalid_parameter(
                "max_depth",
                "0",
                "must be at least 1",
            ));
        }
        if self.min_samples_split < 2 {
            return Err(CrossValError::invalid_parameter(
                "min_samples_split",
                self.min_samples_split.to_string(),
                "must be at least 2",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Criterion {
    Gini,
    Variance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum TreeNode {
    Leaf {
        value: Label,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Running label statistics of one side of a candidate split.
#[derive(Debug, Clone)]
struct NodeStats {
    class_counts: Vec<usize>,
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl NodeStats {
    fn new(num_classes: usize) -> Self {
        NodeStats {
            class_counts: vec![0; num_classes],
            sum: 0.0,
            sum_sq: 0.0,
            count: 0,
        }
    }

    fn add(&mut self, label: f64, class: Option<usize>) {
        if let Some(c) = class {
            self.class_counts[c] += 1;
        }
        self.sum += label;
        self.sum_sq += label * label;
        self.count += 1;
    }

    fn remove(&mut self, label: f64, class: Option<usize>) {
        if let Some(c) = class {
            self.class_counts[c] -= 1;
        }
        self.sum -= label;
        self.sum_sq -= label * label;
        self.count -= 1;
    }

    fn impurity(&self, criterion: Criterion) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        match criterion {
            Criterion::Gini => {
                1.0 - self
                    .class_counts
                    .iter()
                    .map(|&c| (c as f64 / n).powi(2))
                    .sum::<f64>()
            }
            Criterion::Variance => {
                let mean = self.sum / n;
                (self.sum_sq / n - mean * mean).max(0.0)
            }
        }
    }

    /// Impurity weighted by sample count.
    fn cost(&self, criterion: Criterion) -> f64 {
        self.count as f64 * self.impurity(criterion)
    }
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    cost: f64,
    left_rows: Vec<usize>,
    right_rows: Vec<usize>,
}

/// A fitted tree: a flat node vector whose first entry is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FittedTree {
    nodes: Vec<TreeNode>,
    num_features: usize,
}

impl FittedTree {
    fn predict_row(&self, row: ArrayView1<'_, Feature>) -> Label {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row[feature] as f64;
                    // missing values follow the left branch
                    index = if value.is_nan() || value <= threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    fn predict(&self, features: ArrayView2<'_, Feature>) -> Result<Array1<Label>> {
        if features.ncols() != self.num_features {
            return Err(CrossValError::dimension_mismatch(
                format!("{} features", self.num_features),
                format!("{} features", features.ncols()),
            ));
        }
        Ok(features
            .axis_iter(Axis(0))
            .map(|row| self.predict_row(row))
            .collect())
    }

    fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], index: usize) -> usize {
            match nodes[index] {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => 1 + walk(nodes, left).max(walk(nodes, right)),
            }
        }
        walk(&self.nodes, 0)
    }

    fn num_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, TreeNode::Leaf { .. }))
            .count()
    }
}

/// Grows one tree over a fixed training set.
struct TreeGrower<'f, 'l> {
    features: ArrayView2<'f, Feature>,
    labels: ArrayView1<'l, Label>,
    /// Class index per row, classification only
    class_of: Option<Vec<usize>>,
    classes: Vec<Label>,
    criterion: Criterion,
    params: TreeParams,
    nodes: Vec<TreeNode>,
}

impl<'f, 'l> TreeGrower<'f, 'l> {
    fn new(
        features: ArrayView2<'f, Feature>,
        labels: ArrayView1<'l, Label>,
        criterion: Criterion,
        params: TreeParams,
    ) -> Self {
        let (classes, class_of) = match criterion {
            Criterion::Gini => {
                let mut classes: Vec<Label> = labels.to_vec();
                classes.sort_by(|a, b| a.total_cmp(b));
                classes.dedup();
                let class_of = labels
                    .iter()
                    .map(|v| {
                        classes
                            .binary_search_by(|c| c.total_cmp(v))
                            .unwrap_or_default()
                    })
                    .collect();
                (classes, Some(class_of))
            }
            Criterion::Variance => (Vec::new(), None),
        };

        TreeGrower {
            features,
            labels,
            class_of,
            classes,
            criterion,
            params,
            nodes: Vec::new(),
        }
    }

    fn grow(mut self) -> FittedTree {
        let rows: Vec<usize> = (0..self.labels.len()).collect();
        self.grow_node(rows, 0);
        FittedTree {
            nodes: self.nodes,
            num_features: self.features.ncols(),
        }
    }

    fn class(&self, row: usize) -> Option<usize> {
        self.class_of.as_ref().map(|c| c[row])
    }

    fn stats(&self, rows: &[usize]) -> NodeStats {
        let mut stats = NodeStats::new(self.classes.len());
        for &row in rows {
            stats.add(self.labels[row] as f64, self.class(row));
        }
        stats
    }

    fn leaf_value(&self, stats: &NodeStats) -> Label {
        match self.criterion {
            Criterion::Gini => {
                // first maximum wins, so ties go to the smallest class
                let mut best = 0;
                for (c, &count) in stats.class_counts.iter().enumerate() {
                    if count > stats.class_counts[best] {
                        best = c;
                    }
                }
                self.classes.get(best).copied().unwrap_or_default()
            }
            Criterion::Variance => (stats.sum / stats.count.max(1) as f64) as Label,
        }
    }

    /// Grow the subtree over `rows` and return its node index.
    fn grow_node(&mut self, rows: Vec<usize>, depth: usize) -> usize {
        let index = self.nodes.len();
        let stats = self.stats(&rows);
        self.nodes.push(TreeNode::Leaf {
            value: self.leaf_value(&stats),
        });

        let depth_reached = self.params.max_depth.map_or(false, |max| depth >= max);
        if depth_reached || rows.len() < self.params.min_samples_split {
            return index;
        }

        let parent_cost = stats.cost(self.criterion);
        let best = match self.best_split(&rows, &stats) {
            Some(best) if (parent_cost - best.cost) / rows.len() as f64 > IMPURITY_EPSILON => best,
            _ => return index,
        };

        log::trace!(
            "Node {} at depth {}: split feature {} at {:.4}",
            index,
            depth,
            best.feature,
            best.threshold
        );

        let left = self.grow_node(best.left_rows, depth + 1);
        let right = self.grow_node(best.right_rows, depth + 1);
        self.nodes[index] = TreeNode::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        index
    }

    fn best_split(&self, rows: &[usize], total: &NodeStats) -> Option<BestSplit> {
        let mut best: Option<(usize, f64, f64)> = None;

        for feature in 0..self.features.ncols() {
            let column = self.features.column(feature);
            let mut order: Vec<usize> = rows.to_vec();
            order.sort_by(|&a, &b| column[a].total_cmp(&column[b]));

            let mut left = NodeStats::new(self.classes.len());
            let mut right = total.clone();

            for pos in 0..order.len() - 1 {
                let row = order[pos];
                let label = self.labels[row] as f64;
                left.add(label, self.class(row));
                right.remove(label, self.class(row));

                let current = column[row];
                let next = column[order[pos + 1]];
                if current.is_nan() || next.is_nan() || current >= next {
                    continue;
                }

                let cost = left.cost(self.criterion) + right.cost(self.criterion);
                if best.map_or(true, |(_, _, best_cost)| cost < best_cost) {
                    let mut threshold = (current as f64 + next as f64) / 2.0;
                    if threshold >= next as f64 {
                        threshold = current as f64;
                    }
                    best = Some((feature, threshold, cost));
                }
            }
        }

        best.map(|(feature, threshold, cost)| {
            let column = self.features.column(feature);
            let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows.iter().partition(|&&row| {
                let value = column[row] as f64;
                value.is_nan() || value <= threshold
            });
            BestSplit {
                feature,
                threshold,
                cost,
                left_rows,
                right_rows,
            }
        })
    }
}

macro_rules! decision_tree {
    ($(#[$doc:meta])* $name:ident, $kind:expr, $criterion:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            params: TreeParams,
            tree: Option<FittedTree>,
        }

        impl $name {
            /// Create an unfitted tree with default parameters
            pub fn new() -> Self {
                Self::default()
            }

            /// Create an unfitted tree with the given parameters
            pub fn with_params(params: TreeParams) -> Result<Self> {
                params.validate()?;
                Ok($name { params, tree: None })
            }

            /// Limit the tree depth
            pub fn with_max_depth(mut self, max_depth: usize) -> Self {
                self.params.max_depth = Some(max_depth);
                self
            }

            /// Tree parameters
            pub fn params(&self) -> &TreeParams {
                &self.params
            }

            /// Depth of the fitted tree, `None` before `fit`
            pub fn depth(&self) -> Option<usize> {
                self.tree.as_ref().map(FittedTree::depth)
            }

            /// Number of leaves of the fitted tree, `None` before `fit`
            pub fn num_leaves(&self) -> Option<usize> {
                self.tree.as_ref().map(FittedTree::num_leaves)
            }
        }

        impl Estimator for $name {
            fn kind(&self) -> EstimatorKind {
                $kind
            }

            fn fit(&mut self, features: ArrayView2<'_, Feature>, labels: ArrayView1<'_, Label>) -> Result<()> {
                check_training_data(features, labels)?;
                self.params.validate()?;
                let tree = TreeGrower::new(features, labels, $criterion, self.params).grow();
                log::debug!(
                    "{} fitted on {} rows: depth {}, {} leaves",
                    stringify!($name),
                    labels.len(),
                    tree.depth(),
                    tree.num_leaves()
                );
                self.tree = Some(tree);
                Ok(())
            }

            fn predict(&self, features: ArrayView2<'_, Feature>) -> Result<Array1<Label>> {
                match &self.tree {
                    Some(tree) => tree.predict(features),
                    None => Err(CrossValError::prediction(concat!(
                        stringify!($name),
                        " is not fitted"
                    ))),
                }
            }
        }

        impl FromParams for $name {
            fn from_params(params: &Params) -> Result<Self> {
                Self::with_params(TreeParams::from_params(params)?)
            }
        }
    };
}

decision_tree!(
    /// CART classifier using Gini impurity.
    ///
    /// Recognized parameters: `max_depth`, `min_samples_split`.
    DecisionTreeClassifier,
    EstimatorKind::Classifier,
    Criterion::Gini
);

decision_tree!(
    /// CART regressor minimizing within-node variance.
    ///
    /// Recognized parameters: `max_depth`, `min_samples_split`.
    DecisionTreeRegressor,
    EstimatorKind::Regressor,
    Criterion::Variance
);
