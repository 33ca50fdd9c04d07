//! # Pareto Ranking
//!
//! Non-dominated sorting and crowding distance for minimization problems.
//!
//! [`non_dominated_sort`] partitions a set of objective vectors into fronts:
//! front 1 holds the vectors no other vector dominates, front 2 those dominated
//! only by front 1, and so on. The algorithm is picked by the number of
//! objectives:
//!
//! - one objective: a plain sort,
//! - two objectives: a sweep over the lexicographically sorted vectors with a
//!   binary search over the open fronts,
//! - more objectives: divide and conquer on median splits.
//!
//! [`SortAlgorithm::Naive`] forces the quadratic peeling sort instead; every
//! algorithm yields the same partition.
//!
//! ## Example
//!
//! ```rust
//! use mogep::pareto::{non_dominated_sort, SortAlgorithm};
//!
//! let points = vec![vec![1.0, 4.0], vec![2.0, 2.0], vec![3.0, 1.0], vec![4.0, 4.0]];
//! let fronts = non_dominated_sort(&points, SortAlgorithm::Auto).unwrap();
//!
//! assert_eq!(fronts.len(), 2);
//! assert_eq!(fronts.ranks(), &[1, 1, 1, 2]);
//! ```

pub mod crowding;
mod divide;
mod naive;
mod sweep;

use crate::error::{GeneticError, Result};

pub use crowding::{assign_crowding_distance, CrowdedRank};

/// Anything that exposes an objective vector.
pub trait Objectives {
    fn objectives(&self) -> &[f64];
}

impl Objectives for Vec<f64> {
    fn objectives(&self) -> &[f64] {
        self
    }
}

impl Objectives for &[f64] {
    fn objectives(&self) -> &[f64] {
        self
    }
}

/// Returns `true` if `a` is no worse than `b` in every objective and strictly
/// better in at least one.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        if x > y || x.is_nan() || y.is_nan() {
            return false;
        }
        if x < y {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Which non-dominated sort to run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortAlgorithm {
    /// Pick the fastest algorithm for the number of objectives.
    #[default]
    Auto,
    /// Quadratic dominated-count peeling.
    Naive,
}

/// The result of a non-dominated sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParetoFronts {
    fronts: Vec<Vec<usize>>,
    ranks: Vec<usize>,
}

impl ParetoFronts {
    /// Groups item indices by their 1-based rank.
    pub fn from_ranks(ranks: Vec<usize>) -> Self {
        let depth = ranks.iter().copied().max().unwrap_or(0);
        let mut fronts = vec![Vec::new(); depth];
        for (idx, rank) in ranks.iter().enumerate() {
            fronts[rank - 1].push(idx);
        }
        Self { fronts, ranks }
    }

    /// Item indices per front, best front first.
    pub fn fronts(&self) -> &[Vec<usize>] {
        &self.fronts
    }

    /// The 1-based rank of every item, in input order.
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    pub fn rank(&self, idx: usize) -> usize {
        self.ranks[idx]
    }

    /// The best front, or an empty slice for an empty input.
    pub fn first(&self) -> &[usize] {
        self.fronts.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of fronts.
    pub fn len(&self) -> usize {
        self.fronts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fronts.is_empty()
    }

    pub fn into_fronts(self) -> Vec<Vec<usize>> {
        self.fronts
    }
}

/// Sorts `items` into Pareto fronts.
///
/// # Errors
///
/// Returns a `Configuration` error if the objective vectors are empty, differ
/// in length, or contain NaN.
pub fn non_dominated_sort<T: Objectives>(
    items: &[T],
    algorithm: SortAlgorithm,
) -> Result<ParetoFronts> {
    let points: Vec<&[f64]> = items.iter().map(Objectives::objectives).collect();
    let Some(first) = points.first() else {
        return Ok(ParetoFronts::default());
    };

    let dimensions = first.len();
    if dimensions == 0 {
        return Err(GeneticError::Configuration(
            "Objective vectors must not be empty".to_string(),
        ));
    }
    if let Some(idx) = points.iter().position(|p| p.len() != dimensions) {
        return Err(GeneticError::Configuration(format!(
            "Item {} has {} objectives, expected {}",
            idx,
            points[idx].len(),
            dimensions
        )));
    }
    if let Some(idx) = points.iter().position(|p| p.iter().any(|v| v.is_nan())) {
        return Err(GeneticError::Configuration(format!(
            "Item {} has a NaN objective",
            idx
        )));
    }

    let ranks = match (algorithm, dimensions) {
        (SortAlgorithm::Naive, _) => naive::ranks(&points),
        (SortAlgorithm::Auto, 1) => sweep::ranks_single(&points),
        (SortAlgorithm::Auto, 2) => sweep::ranks_bi(&points),
        (SortAlgorithm::Auto, _) => divide::ranks(&points),
    };

    Ok(ParetoFronts::from_ranks(ranks))
}
