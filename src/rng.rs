//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps the `rand` crate's `StdRng` and exposes
//! the handful of draws the genetic operators need: uniform floats, indices,
//! Bernoulli trials, distinct index pairs and shuffles.
//!
//! Every random decision of a run flows through one generator, so seeding it with
//! [`RandomNumberGenerator::from_seed`] reproduces the whole run.
//!
//! ## Example
//!
//! ```rust
//! use mogep::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let constants = rng.fetch_uniform(-1.0, 1.0, 5);
//!
//! assert_eq!(constants.len(), 5);
//! assert!(constants.iter().all(|c| (-1.0..1.0).contains(c)));
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng` that provides the draws used by
/// the evolution engine.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible runs, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates `num` floating-point numbers uniformly distributed in `[from, to)`.
    ///
    /// Returns a vector of `from` values when the range is empty.
    pub fn fetch_uniform(&mut self, from: f64, to: f64, num: usize) -> Vec<f64> {
        if !(from < to) {
            return vec![from; num];
        }
        (0..num).map(|_| self.rng.gen_range(from..to)).collect()
    }

    /// Draws a number uniformly from `[0, 1)`.
    pub fn gen_probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Runs a Bernoulli trial that succeeds with probability `rate`.
    ///
    /// Rates at or below zero never succeed and rates at or above one always do.
    pub fn trial(&mut self, rate: f64) -> bool {
        self.gen_probability() < rate
    }

    /// Draws an index uniformly from `0..bound`.
    ///
    /// `bound` must be positive.
    pub fn gen_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "cannot draw an index from an empty range");
        self.rng.gen_range(0..bound)
    }

    /// Draws an index uniformly from `from..to`.
    pub fn gen_index_in(&mut self, from: usize, to: usize) -> usize {
        debug_assert!(from < to, "cannot draw an index from an empty range");
        self.rng.gen_range(from..to)
    }

    /// Draws two distinct indices from `0..bound` and returns them in ascending order.
    ///
    /// Returns `None` if `bound < 2`.
    pub fn distinct_pair(&mut self, bound: usize) -> Option<(usize, usize)> {
        if bound < 2 {
            return None;
        }
        let first = self.rng.gen_range(0..bound);
        let mut second = self.rng.gen_range(0..bound - 1);
        if second >= first {
            second += 1;
        }
        Some((first.min(second), first.max(second)))
    }

    /// Picks one element of `items` uniformly, or `None` if the slice is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Shuffles `items` in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
