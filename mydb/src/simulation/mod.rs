//! Deterministic simulation of the AVL index.
//!
//! This module drives an [`AvlTree`](crate::index::AvlTree) with seeded,
//! reproducible operation sequences and checks it against a `BTreeMap`
//! model after every step:
//! - every structural invariant (ordering, balance, cached heights, size)
//! - the AVL height bound
//! - search results, including that duplicate inserts keep the first value
//! - distance symmetry and the missing-key sentinel
//! - copy independence
//!
//! # Usage
//!
//! ```
//! use mydb::simulation::{KeyPattern, Simulator, SimulatorConfig};
//!
//! let config = SimulatorConfig::new(12345) // seed
//!     .with_key_pattern(KeyPattern::Ascending)
//!     .with_key_space(500);
//!
//! let mut sim = Simulator::new(config);
//! let result = sim.run(1000); // Run 1000 operations
//!
//! assert!(result.passed(), "{:?}", result.violations);
//! ```

mod op_gen;
mod simulator;

pub use op_gen::{KeyPattern, Operation, OperationGenConfig, OperationGenerator};
pub use simulator::{SimulationResult, SimulationViolation, Simulator, SimulatorConfig, avl_height_bound};
