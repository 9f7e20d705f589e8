//! Whole-tree audit of the AVL invariants.
//!
//! The insert path maintains every invariant incrementally; this module
//! re-derives them from scratch so tests and the simulation can verify the
//! tree after each operation.

use std::fmt;

use crate::index::node::{EMPTY_HEIGHT, NodeId};
use crate::index::tree::AvlTree;

/// The first invariant violation found by [`AvlTree::check_invariants`].
///
/// Nodes are identified by their arena slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A key is not strictly between the bounds its ancestors impose.
    /// Duplicate keys show up as this violation too.
    OutOfOrder { slot: usize },
    /// The cached height disagrees with the height derived from the children.
    StaleHeight {
        slot: usize,
        cached: i32,
        actual: i32,
    },
    /// The children's heights differ by more than one.
    Unbalanced {
        slot: usize,
        left_height: i32,
        right_height: i32,
    },
    /// The recorded size differs from the number of reachable nodes.
    SizeMismatch { recorded: usize, reachable: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfOrder { slot } => write!(f, "node {slot} breaks key ordering"),
            Self::StaleHeight {
                slot,
                cached,
                actual,
            } => write!(f, "node {slot} caches height {cached} but has height {actual}"),
            Self::Unbalanced {
                slot,
                left_height,
                right_height,
            } => write!(
                f,
                "node {slot} is unbalanced: left height {left_height}, right height {right_height}"
            ),
            Self::SizeMismatch {
                recorded,
                reachable,
            } => write!(f, "size is {recorded} but {reachable} nodes are reachable"),
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl<K: Ord, V> AvlTree<K, V> {
    /// Verify ordering, balance, cached heights, and size over the whole tree.
    ///
    /// Runs in O(n); meant for tests and simulation, not the insert path.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut reachable = 0;
        self.audit(self.root, None, None, &mut reachable)?;

        if reachable != self.size {
            return Err(InvariantViolation::SizeMismatch {
                recorded: self.size,
                reachable,
            });
        }
        Ok(())
    }

    /// Audit the subtree at `link` whose keys must lie strictly between
    /// `lower` and `upper`. Returns the subtree's derived height.
    fn audit<'a>(
        &'a self,
        link: Option<NodeId>,
        lower: Option<&'a K>,
        upper: Option<&'a K>,
        reachable: &mut usize,
    ) -> Result<i32, InvariantViolation> {
        let Some(id) = link else {
            return Ok(EMPTY_HEIGHT);
        };
        let node = self.node(id);
        let slot = id.index();

        let below_lower = lower.is_some_and(|bound| node.key <= *bound);
        let above_upper = upper.is_some_and(|bound| node.key >= *bound);
        if below_lower || above_upper {
            return Err(InvariantViolation::OutOfOrder { slot });
        }

        // A reachable count past the arena length means a link cycle.
        *reachable += 1;
        if *reachable > self.nodes.len() {
            return Err(InvariantViolation::SizeMismatch {
                recorded: self.size,
                reachable: *reachable,
            });
        }

        let left_height = self.audit(node.left, lower, Some(&node.key), reachable)?;
        let right_height = self.audit(node.right, Some(&node.key), upper, reachable)?;
        let actual = 1 + left_height.max(right_height);

        if node.height != actual {
            return Err(InvariantViolation::StaleHeight {
                slot,
                cached: node.height,
                actual,
            });
        }
        if (left_height - right_height).abs() > 1 {
            return Err(InvariantViolation::Unbalanced {
                slot,
                left_height,
                right_height,
            });
        }
        Ok(actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::node::Node;

    fn chain() -> AvlTree<i32, ()> {
        // 1 -> 2 -> 3 down the right spine, heights kept accurate.
        let mut tree = AvlTree::new();
        for key in [1, 2, 3] {
            tree.nodes.push(Node::leaf(key, ()));
        }
        tree.nodes[0].right = Some(NodeId::from_index(1));
        tree.nodes[0].height = 2;
        tree.nodes[1].right = Some(NodeId::from_index(2));
        tree.nodes[1].height = 1;
        tree.root = Some(NodeId::from_index(0));
        tree.size = 3;
        tree
    }

    #[test]
    fn test_detects_unbalanced_node() {
        let tree = chain();
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::Unbalanced {
                slot: 0,
                left_height: -1,
                right_height: 1,
            })
        );
    }

    #[test]
    fn test_detects_stale_height() {
        let mut tree = chain();
        tree.nodes[1].height = 5;
        assert!(matches!(
            tree.check_invariants(),
            Err(InvariantViolation::StaleHeight { slot: 1, cached: 5, actual: 1 })
        ));
    }

    #[test]
    fn test_detects_out_of_order_key() {
        let mut tree = chain();
        tree.nodes[2].key = 0;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::OutOfOrder { slot: 2 })
        );
    }

    #[test]
    fn test_detects_size_mismatch() {
        let mut tree = AvlTree::new();
        tree.insert(1, ());
        tree.insert(2, ());
        tree.size = 5;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::SizeMismatch {
                recorded: 5,
                reachable: 2,
            })
        );
    }

    #[test]
    fn test_violation_display() {
        let violation = InvariantViolation::Unbalanced {
            slot: 3,
            left_height: 2,
            right_height: 0,
        };
        assert_eq!(
            violation.to_string(),
            "node 3 is unbalanced: left height 2, right height 0"
        );
    }
}
