//! Main simulator harness for deterministic simulation testing.
//!
//! Drives an `AvlTree<u32, u64>` with generated operations and compares it
//! against a `BTreeMap` model after each one. The value stored with a key is
//! the index of the operation that first inserted it, so a duplicate insert
//! that overwrote the value would show up as a search mismatch.

use std::collections::BTreeMap;

use super::op_gen::{KeyPattern, Operation, OperationGenConfig, OperationGenerator};
use crate::index::{AvlTree, MISSING_DISTANCE};

/// Configuration for the simulator.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Random seed for reproducibility.
    pub seed: u64,
    /// Operation generation configuration.
    pub op_config: OperationGenConfig,
}

impl SimulatorConfig {
    /// Create a new simulator config with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            op_config: OperationGenConfig::default(),
        }
    }

    /// Set the operation configuration.
    #[must_use]
    pub const fn with_op_config(mut self, config: OperationGenConfig) -> Self {
        self.op_config = config;
        self
    }

    /// Set the insert key pattern.
    #[must_use]
    pub const fn with_key_pattern(mut self, pattern: KeyPattern) -> Self {
        self.op_config.key_pattern = pattern;
        self
    }

    /// Set the key space size.
    #[must_use]
    pub const fn with_key_space(mut self, key_space: u32) -> Self {
        self.op_config.key_space = key_space;
        self
    }
}

/// A mismatch between the tree and the model, or a broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationViolation {
    /// Index of the operation after which the violation was found.
    pub operation_index: usize,
    /// What went wrong.
    pub description: String,
}

/// Results from a simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The seed used for this simulation.
    pub seed: u64,
    /// Number of operations applied.
    pub operations: usize,
    /// Inserts whose key was already present.
    pub duplicate_inserts: usize,
    /// Tree size after the last operation.
    pub final_size: usize,
    /// Tree height after the last operation.
    pub final_height: i32,
    /// Violations detected.
    pub violations: Vec<SimulationViolation>,
}

impl SimulationResult {
    /// Check if the simulation passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Upper bound on the height of an AVL tree holding `size` nodes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn avl_height_bound(size: usize) -> f64 {
    1.44f64.mul_add((size as f64 + 2.0).log2(), -0.328)
}

/// The main simulator harness.
pub struct Simulator {
    config: SimulatorConfig,
    generator: OperationGenerator,
    tree: AvlTree<u32, u64>,
    model: BTreeMap<u32, u64>,
    violations: Vec<SimulationViolation>,
    operations: usize,
    duplicate_inserts: usize,
}

impl Simulator {
    /// Create a new simulator with the given configuration.
    #[must_use]
    pub fn new(config: SimulatorConfig) -> Self {
        let generator = OperationGenerator::new(config.seed, config.op_config.clone());
        Self {
            config,
            generator,
            tree: AvlTree::new(),
            model: BTreeMap::new(),
            violations: Vec::new(),
            operations: 0,
            duplicate_inserts: 0,
        }
    }

    /// Run `count` more operations, checking the tree after each one.
    pub fn run(&mut self, count: usize) -> SimulationResult {
        for _ in 0..count {
            let index = self.operations;
            let operation = self.generator.next_operation();
            self.apply(index, operation);
            self.check_tree(index);
            self.operations += 1;
        }

        tracing::debug!(
            "simulation seed {} finished {} operations: size {}, height {}, {} violations",
            self.config.seed,
            self.operations,
            self.tree.size(),
            self.tree.height(),
            self.violations.len()
        );

        SimulationResult {
            seed: self.config.seed,
            operations: self.operations,
            duplicate_inserts: self.duplicate_inserts,
            final_size: self.tree.size(),
            final_height: self.tree.height(),
            violations: self.violations.clone(),
        }
    }

    /// The tree under test.
    #[must_use]
    pub const fn tree(&self) -> &AvlTree<u32, u64> {
        &self.tree
    }

    fn violation(&mut self, operation_index: usize, description: String) {
        tracing::warn!("violation after operation {operation_index}: {description}");
        self.violations.push(SimulationViolation {
            operation_index,
            description,
        });
    }

    fn apply(&mut self, index: usize, operation: Operation) {
        match operation {
            Operation::Insert { key } => {
                let value = u64::try_from(index).unwrap_or(u64::MAX);
                if self.model.contains_key(&key) {
                    self.duplicate_inserts += 1;
                }
                self.model.entry(key).or_insert(value);
                self.tree.insert(key, value);
            }
            Operation::Search { key } => {
                let found = self.tree.search(&key).copied();
                let expected = self.model.get(&key).copied();
                if found != expected {
                    self.violation(
                        index,
                        format!("search({key}) returned {found:?}, expected {expected:?}"),
                    );
                }
            }
            Operation::Distance { a, b } => self.check_distance(index, a, b),
            Operation::Copy => self.check_copy(index),
            Operation::Clear => {
                self.tree.clear();
                self.model.clear();
            }
        }
    }

    fn check_distance(&mut self, index: usize, a: u32, b: u32) {
        let forward = self.tree.distance(&a, &b);
        let backward = self.tree.distance(&b, &a);
        if forward != backward {
            self.violation(
                index,
                format!("distance({a}, {b}) = {forward} but distance({b}, {a}) = {backward}"),
            );
        }

        let both_present = self.model.contains_key(&a) && self.model.contains_key(&b);
        if !both_present {
            if forward != MISSING_DISTANCE {
                self.violation(
                    index,
                    format!("distance({a}, {b}) = {forward} with a missing key"),
                );
            }
            return;
        }

        let max_path = 2 * self.tree.height();
        let valid = if a == b {
            forward == 0
        } else {
            forward > 0 && forward <= max_path
        };
        if !valid {
            self.violation(
                index,
                format!("distance({a}, {b}) = {forward} outside 1..={max_path}"),
            );
        }
    }

    fn check_copy(&mut self, index: usize) {
        let mut copy = self.tree.clone();

        if let Err(error) = copy.check_invariants() {
            self.violation(index, format!("copy is not a valid AVL tree: {error}"));
        }
        if copy.inorder_keys() != self.tree.inorder_keys()
            || copy.inorder_values() != self.tree.inorder_values()
        {
            self.violation(index, "copy differs from the original".to_string());
        }

        // Mutating the copy must leave the original untouched.
        let size = self.tree.size();
        copy.insert(u32::MAX, 0);
        copy.clear();
        if self.tree.size() != size || self.tree.contains(&u32::MAX) {
            self.violation(index, "copy shares nodes with the original".to_string());
        }
    }

    fn check_tree(&mut self, index: usize) {
        if let Err(error) = self.tree.check_invariants() {
            self.violation(index, error.to_string());
        }

        if self.tree.size() != self.model.len() {
            self.violation(
                index,
                format!(
                    "tree size {} but model holds {} keys",
                    self.tree.size(),
                    self.model.len()
                ),
            );
        }

        let height = self.tree.height();
        let bound = avl_height_bound(self.tree.size());
        if !self.tree.is_empty() && f64::from(height) > bound {
            self.violation(
                index,
                format!(
                    "height {height} exceeds AVL bound {bound:.2} for {} nodes",
                    self.tree.size()
                ),
            );
        }
    }
}
