//! AVL tree used as an in-memory secondary index.
//!
//! Keys are unique and totally ordered; values are opaque to the tree. The
//! tree keeps every node's cached height current and restores the AVL
//! balance condition after each insert with at most one single or double
//! rotation per unbalanced ancestor.
//!
//! Nodes carry no parent link. Insert records the path it descended and the
//! rotation routines receive the parent of the rotated node explicitly, so a
//! rotation can re-link the new subtree root into its parent (or the root
//! link) without any back pointer.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use crate::index::node::{EMPTY_HEIGHT, Node, NodeId};

/// Sentinel returned by [`AvlTree::distance`] when either key is absent.
pub const MISSING_DISTANCE: i32 = -1;

/// A height-balanced binary search tree mapping unique keys to values.
///
/// # Invariants
///
/// After every public call returns:
/// - every key in a node's left subtree is less than the node's key, every
///   key in its right subtree is greater,
/// - `|height(left) - height(right)| <= 1` at every node,
/// - every cached height equals `1 + max(height(left), height(right))`,
/// - `size` equals the number of nodes reachable from the root.
#[derive(Debug)]
pub struct AvlTree<K, V> {
    pub(super) nodes: Vec<Node<K, V>>,
    pub(super) root: Option<NodeId>,
    pub(super) size: usize,
}

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> AvlTree<K, V> {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            size: 0,
        }
    }

    /// Number of entries in the tree.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Height of the tree: 0 for a single node, -1 when empty.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height_of(self.root)
    }

    /// Remove every entry.
    ///
    /// Children are released before their parent and `size` drops by one
    /// per released node, so it reaches zero exactly when the walk ends.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            self.release(root);
        }
        debug_assert_eq!(self.size, 0, "clear must release every live node");
        self.nodes.clear();
        self.size = 0;
    }

    /// Keys in ascending order.
    #[must_use]
    pub fn inorder_keys(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.size);
        self.walk_in_order(self.root, &mut |node| keys.push(&node.key));
        keys
    }

    /// Values in ascending key order.
    #[must_use]
    pub fn inorder_values(&self) -> Vec<&V> {
        let mut values = Vec::with_capacity(self.size);
        self.walk_in_order(self.root, &mut |node| values.push(&node.value));
        values
    }

    /// Cached node heights in ascending key order.
    #[must_use]
    pub fn inorder_heights(&self) -> Vec<i32> {
        let mut heights = Vec::with_capacity(self.size);
        self.walk_in_order(self.root, &mut |node| heights.push(node.height));
        heights
    }

    /// `(key, value, height)` for every node in ascending key order.
    #[must_use]
    pub fn inorder_entries(&self) -> Vec<(&K, &V, i32)> {
        let mut entries = Vec::with_capacity(self.size);
        self.walk_in_order(self.root, &mut |node| {
            entries.push((&node.key, &node.value, node.height));
        });
        entries
    }

    pub(super) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.index()]
    }

    /// Cached height of a link; absent subtrees are [`EMPTY_HEIGHT`].
    pub(super) fn height_of(&self, link: Option<NodeId>) -> i32 {
        link.map_or(EMPTY_HEIGHT, |id| self.node(id).height)
    }

    /// Recompute a node's cached height from its children.
    fn update_height(&mut self, id: NodeId) {
        let node = self.node(id);
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.node_mut(id).height = height;
    }

    fn walk_in_order<'a>(&'a self, link: Option<NodeId>, visit: &mut impl FnMut(&'a Node<K, V>)) {
        if let Some(id) = link {
            let node = self.node(id);
            self.walk_in_order(node.left, visit);
            visit(node);
            self.walk_in_order(node.right, visit);
        }
    }

    fn release(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        let (left, right) = (node.left.take(), node.right.take());
        if let Some(left) = left {
            self.release(left);
        }
        if let Some(right) = right {
            self.release(right);
        }
        self.size -= 1;
    }

    /// Point `parent`'s link to `old` (or the root link) at `new`.
    fn relink(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        let Some(parent) = parent else {
            self.root = Some(new);
            return;
        };
        let parent = self.node_mut(parent);
        if parent.left == Some(old) {
            parent.left = Some(new);
        } else {
            assert_eq!(parent.right, Some(old), "rotated node is not a child of its parent");
            parent.right = Some(new);
        }
    }

    /// Rotate right around `id`, whose left child becomes the subtree root.
    ///
    /// `parent` is the node linking to `id`, or `None` when `id` is the root.
    pub(super) fn rotate_right(&mut self, parent: Option<NodeId>, id: NodeId) {
        let Some(pivot) = self.node(id).left else {
            panic!("right rotation requires a left child");
        };
        let inner = self.node(pivot).right;

        self.node_mut(id).left = inner;
        self.node_mut(pivot).right = Some(id);
        self.relink(parent, id, pivot);

        // Child first: the pivot's height depends on the demoted node.
        self.update_height(id);
        self.update_height(pivot);
    }

    /// Rotate left around `id`, whose right child becomes the subtree root.
    ///
    /// `parent` is the node linking to `id`, or `None` when `id` is the root.
    pub(super) fn rotate_left(&mut self, parent: Option<NodeId>, id: NodeId) {
        let Some(pivot) = self.node(id).right else {
            panic!("left rotation requires a right child");
        };
        let inner = self.node(pivot).left;

        self.node_mut(id).right = inner;
        self.node_mut(pivot).left = Some(id);
        self.relink(parent, id, pivot);

        self.update_height(id);
        self.update_height(pivot);
    }

    /// Restore balance at `id`, whose children differ in height by two.
    ///
    /// Equal grandchild heights take the single rotation.
    pub(super) fn rebalance(&mut self, parent: Option<NodeId>, id: NodeId) {
        let node = self.node(id);
        let (left, right) = (node.left, node.right);

        if self.height_of(left) > self.height_of(right) {
            let Some(child) = left else {
                panic!("left-heavy node must have a left child");
            };
            let child_node = self.node(child);
            if self.height_of(child_node.left) >= self.height_of(child_node.right) {
                self.rotate_right(parent, id);
            } else {
                self.rotate_left(Some(id), child);
                self.rotate_right(parent, id);
            }
        } else {
            let Some(child) = right else {
                panic!("right-heavy node must have a right child");
            };
            let child_node = self.node(child);
            if self.height_of(child_node.right) >= self.height_of(child_node.left) {
                self.rotate_left(parent, id);
            } else {
                self.rotate_right(Some(id), child);
                self.rotate_left(parent, id);
            }
        }
    }
}

impl<K: Ord, V> AvlTree<K, V> {
    /// Look up the value stored under `key`.
    pub fn search<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = self.root;
        while let Some(id) = link {
            let node = self.node(id);
            match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => link = node.left,
                Ordering::Greater => link = node.right,
            }
        }
        None
    }

    /// Whether `key` is present.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Insert `key` with `value`.
    ///
    /// If `key` is already present the tree is left untouched: the stored
    /// value is kept and nothing is reported.
    pub fn insert(&mut self, key: K, value: V) {
        let mut path = Vec::new();
        let mut link = self.root;
        let mut goes_left = false;

        while let Some(id) = link {
            let node = self.node(id);
            match key.cmp(&node.key) {
                Ordering::Equal => return,
                Ordering::Less => {
                    goes_left = true;
                    link = node.left;
                }
                Ordering::Greater => {
                    goes_left = false;
                    link = node.right;
                }
            }
            path.push(id);
        }

        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::leaf(key, value));

        match path.last() {
            None => self.root = Some(id),
            Some(&parent) if goes_left => self.node_mut(parent).left = Some(id),
            Some(&parent) => self.node_mut(parent).right = Some(id),
        }
        self.size += 1;

        self.repair(path);
    }

    /// Walk the insert path bottom-up, refreshing heights and rotating where
    /// the balance condition broke.
    fn repair(&mut self, mut path: Vec<NodeId>) {
        while let Some(id) = path.pop() {
            let node = self.node(id);
            let left = self.height_of(node.left);
            let right = self.height_of(node.right);
            let height = 1 + left.max(right);

            // Nothing above an unchanged subtree can have changed either.
            if node.height == height {
                break;
            }
            self.node_mut(id).height = height;

            if (left - right).abs() > 1 {
                self.rebalance(path.last().copied(), id);
            }
        }
    }

    /// Number of edges on the tree path between `a` and `b`.
    ///
    /// Returns `None` if either key is absent.
    pub fn path_length<Q>(&self, a: &Q, b: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.contains(a) || !self.contains(b) {
            return None;
        }
        if a == b {
            return Some(0);
        }
        self.distance_from_split(self.root?, a, b)
    }

    /// Number of edges between `a` and `b`, or [`MISSING_DISTANCE`] if
    /// either key is absent.
    pub fn distance<Q>(&self, a: &Q, b: &Q) -> i32
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.path_length(a, b).map_or(MISSING_DISTANCE, |edges| {
            i32::try_from(edges).unwrap_or(i32::MAX)
        })
    }

    /// Descend to the split point of `a` and `b`, then sum both depths below it.
    fn distance_from_split<Q>(&self, id: NodeId, a: &Q, b: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.node(id);
        let key: &Q = node.key.borrow();
        match (key.cmp(a), key.cmp(b)) {
            (Ordering::Greater, Ordering::Greater) => self.distance_from_split(node.left?, a, b),
            (Ordering::Less, Ordering::Less) => self.distance_from_split(node.right?, a, b),
            _ => Some(self.depth_below(id, a)? + self.depth_below(id, b)?),
        }
    }

    /// Edges from `id` down to `key`.
    fn depth_below<Q>(&self, id: NodeId, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.node(id);
        match key.cmp(node.key.borrow()) {
            Ordering::Equal => Some(0),
            Ordering::Less => self.depth_below(node.left?, key).map(|depth| depth + 1),
            Ordering::Greater => self.depth_below(node.right?, key).map(|depth| depth + 1),
        }
    }
}

/// Copies by re-inserting every entry in pre-order.
///
/// The copy holds the same entries and satisfies every invariant but may be
/// shaped differently from the source.
impl<K: Ord + Clone, V: Clone> Clone for AvlTree<K, V> {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        self.copy_into(self.root, &mut copy);
        copy
    }
}

impl<K: Ord + Clone, V: Clone> AvlTree<K, V> {
    fn copy_into(&self, link: Option<NodeId>, dest: &mut Self) {
        if let Some(id) = link {
            let node = self.node(id);
            dest.insert(node.key.clone(), node.value.clone());
            self.copy_into(node.left, dest);
            self.copy_into(node.right, dest);
        }
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for AvlTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nodes in order: ")?;
        for (key, value, height) in self.inorder_entries() {
            write!(f, "({key},{value},{height}) ")?;
        }
        Ok(())
    }
}
