//! In-memory AVL index.
//!
//! The index maps column values to the byte offsets of the records holding
//! them. It is rebuilt from the data file on every run and never persisted.
//!
//! # Structure
//!
//! - [`AvlTree`]: the height-balanced search tree (insert, search, distance,
//!   in-order views, clear, copy)
//! - [`InvariantViolation`]: result of the whole-tree audit
//!
//! # Usage
//!
//! ```
//! use mydb::index::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for key in [10, 20, 30, 40, 50, 25] {
//!     tree.insert(key, key * 100);
//! }
//!
//! assert_eq!(tree.search(&25), Some(&2500));
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.distance(&10, &99), -1);
//! ```

mod invariants;
mod node;
mod tree;

pub use invariants::InvariantViolation;
pub use node::EMPTY_HEIGHT;
pub use tree::{AvlTree, MISSING_DISTANCE};
