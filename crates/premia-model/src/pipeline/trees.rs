//! Gradient-boosted regression tree ensemble
//!
//! Standard additive scoring: `base_score + learning_rate * sum(tree(x))`.
//! Split rule is `x[feature] < threshold` goes left; a missing or NaN
//! feature takes the right branch.

use premia_common::PredictionError;
use serde::{Deserialize, Serialize};

/// One node of a regression tree, indexing into [`Tree::nodes`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree; node 0 is the root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Walk the tree for one feature vector.
    ///
    /// Node indices come from a serialized artifact, so out-of-range links
    /// and cycles are reported instead of panicking or spinning. Any walk
    /// longer than the node count has revisited a node.
    pub fn score(&self, features: &[f64]) -> Result<f64, PredictionError> {
        let mut index = 0;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(Node::Leaf { value }) => return Ok(*value),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().unwrap_or(f64::NAN);
                    index = if value < *threshold { *left } else { *right };
                }
                None => {
                    return Err(PredictionError::Internal(format!(
                        "tree references missing node {}",
                        index
                    )))
                }
            }
        }
        Err(PredictionError::Internal(
            "tree walk exceeded node count (cycle in artifact)".to_string(),
        ))
    }
}

/// The fitted ensemble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbmModel {
    pub base_score: f64,
    pub learning_rate: f64,
    pub trees: Vec<Tree>,
}

impl GbmModel {
    pub fn score(&self, features: &[f64]) -> Result<f64, PredictionError> {
        let mut total = self.base_score;
        for tree in &self.trees {
            total += self.learning_rate * tree.score(features)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> Tree {
        Tree {
            nodes: vec![
                Node::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { value: low },
                Node::Leaf { value: high },
            ],
        }
    }

    #[test]
    fn test_split_routes_on_threshold() {
        let tree = stump(0, 10.0, -1.0, 1.0);
        assert_eq!(tree.score(&[5.0]).unwrap(), -1.0);
        assert_eq!(tree.score(&[10.0]).unwrap(), 1.0);
        assert_eq!(tree.score(&[15.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_missing_feature_takes_right_branch() {
        let tree = stump(7, 10.0, -1.0, 1.0);
        assert_eq!(tree.score(&[0.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_ensemble_sums_tree_outputs() {
        let model = GbmModel {
            base_score: 100.0,
            learning_rate: 0.5,
            trees: vec![stump(0, 10.0, -2.0, 2.0), stump(0, 20.0, 4.0, 8.0)],
        };
        // x=15: first stump -> 2.0, second -> 4.0
        assert_eq!(model.score(&[15.0]).unwrap(), 100.0 + 0.5 * (2.0 + 4.0));
    }

    #[test]
    fn test_dangling_node_index_is_an_error() {
        let tree = Tree {
            nodes: vec![Node::Split {
                feature: 0,
                threshold: 0.0,
                left: 9,
                right: 9,
            }],
        };
        assert!(matches!(
            tree.score(&[1.0]),
            Err(PredictionError::Internal(_))
        ));
    }

    #[test]
    fn test_cyclic_tree_is_an_error() {
        let tree = Tree {
            nodes: vec![Node::Split {
                feature: 0,
                threshold: 0.0,
                left: 0,
                right: 0,
            }],
        };
        assert!(matches!(
            tree.score(&[1.0]),
            Err(PredictionError::Internal(_))
        ));
    }
}
