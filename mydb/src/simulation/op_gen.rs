//! Operation generator for deterministic simulation testing.
//!
//! This module generates random but reproducible index operation sequences.
//! Insert keys follow a configurable [`KeyPattern`] so the simulation can hit
//! every rotation case: sorted runs force repeated single rotations, zig-zag
//! runs force double rotations, and uniform keys mix all four.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Order in which insert keys are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPattern {
    /// Keys drawn uniformly from the key space (duplicates likely).
    Uniform,
    /// `0, 1, 2, ...`, wrapping at the end of the key space.
    Ascending,
    /// `n-1, n-2, ...`, wrapping at the start of the key space.
    Descending,
    /// Alternating from both ends: `0, n-1, 1, n-2, ...`.
    ZigZag,
}

/// Configuration for operation generation.
#[derive(Debug, Clone)]
pub struct OperationGenConfig {
    /// Insert key order.
    pub key_pattern: KeyPattern,
    /// Insert keys lie in `0..key_space`. Lookups also probe a margin past it.
    pub key_space: u32,
    /// Probability of a search (0.0 - 1.0).
    pub search_rate: f64,
    /// Probability of a distance query (0.0 - 1.0).
    pub distance_rate: f64,
    /// Probability of copying the tree (0.0 - 1.0).
    pub copy_rate: f64,
    /// Probability of clearing the tree (0.0 - 1.0).
    pub clear_rate: f64,
}

impl Default for OperationGenConfig {
    fn default() -> Self {
        Self {
            key_pattern: KeyPattern::Uniform,
            key_space: 10_000,
            search_rate: 0.2,
            distance_rate: 0.1,
            copy_rate: 0.005,
            clear_rate: 0.001,
        }
    }
}

impl OperationGenConfig {
    /// A configuration that only inserts.
    #[must_use]
    pub fn inserts_only(key_pattern: KeyPattern, key_space: u32) -> Self {
        Self {
            key_pattern,
            key_space,
            search_rate: 0.0,
            distance_rate: 0.0,
            copy_rate: 0.0,
            clear_rate: 0.0,
        }
    }
}

/// A single simulated index operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Insert { key: u32 },
    Search { key: u32 },
    Distance { a: u32, b: u32 },
    Copy,
    Clear,
}

/// Generator for random [`Operation`]s.
///
/// Produces the same sequence for the same seed and configuration.
pub struct OperationGenerator {
    rng: StdRng,
    config: OperationGenConfig,
    /// Position within a sequential key pattern.
    cursor: u32,
}

impl OperationGenerator {
    /// Create a new operation generator.
    ///
    /// Pre-condition: `config.key_space > 0`.
    #[must_use]
    pub fn new(seed: u64, config: OperationGenConfig) -> Self {
        assert!(config.key_space > 0, "key space must not be empty");
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
            cursor: 0,
        }
    }

    /// Generate the next operation.
    pub fn next_operation(&mut self) -> Operation {
        let roll = self.rng.random::<f64>();
        let config = &self.config;

        let mut threshold = config.clear_rate;
        if roll < threshold {
            return Operation::Clear;
        }
        threshold += config.copy_rate;
        if roll < threshold {
            return Operation::Copy;
        }
        threshold += config.distance_rate;
        if roll < threshold {
            let a = self.probe_key();
            let b = self.probe_key();
            return Operation::Distance { a, b };
        }
        threshold += config.search_rate;
        if roll < threshold {
            return Operation::Search {
                key: self.probe_key(),
            };
        }
        Operation::Insert {
            key: self.insert_key(),
        }
    }

    /// A lookup key: usually inside the key space, sometimes just past it.
    fn probe_key(&mut self) -> u32 {
        let space = self.config.key_space;
        let margin = (space / 10).max(1);
        self.rng.random_range(0..space.saturating_add(margin))
    }

    /// The next insert key according to the configured pattern.
    fn insert_key(&mut self) -> u32 {
        let space = self.config.key_space;
        let step = self.cursor;
        self.cursor = (self.cursor + 1) % space;

        match self.config.key_pattern {
            KeyPattern::Uniform => self.rng.random_range(0..space),
            KeyPattern::Ascending => step,
            KeyPattern::Descending => space - 1 - step,
            KeyPattern::ZigZag if step % 2 == 0 => step / 2,
            KeyPattern::ZigZag => space - 1 - step / 2,
        }
    }
}
