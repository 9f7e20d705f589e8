//! Node storage for the AVL index.
//!
//! Nodes live in an arena owned by the tree and refer to their children by
//! [`NodeId`]. Every node is reachable from exactly one link: either the
//! tree's root link or one child link of its parent. Nodes are never freed
//! individually; the arena is emptied as a whole by `clear` or on drop.

/// Height reported for an absent subtree.
pub const EMPTY_HEIGHT: i32 = -1;

/// Index of a node inside the tree's arena.
///
/// A `NodeId` is only meaningful for the tree that allocated it and stays
/// valid until that tree is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a node ID from an arena slot.
    ///
    /// Panics if the arena grew past `u32::MAX` nodes.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        let Ok(slot) = u32::try_from(index) else {
            panic!("index arena exceeded {} nodes", u32::MAX);
        };
        Self(slot)
    }

    /// Get the arena slot of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single index entry.
///
/// # Invariants
///
/// - `height == 1 + max(height(left), height(right))`, where an absent child
///   counts as [`EMPTY_HEIGHT`]. A leaf therefore has height 0.
#[derive(Debug)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub height: i32,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    /// Create a detached leaf.
    #[must_use]
    pub const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            height: 0,
            left: None,
            right: None,
        }
    }
}
