use std::fmt::Debug;

use crate::error::Result;
use crate::pareto::CrowdedRank;
use crate::rng::RandomNumberGenerator;

/// Trait for parent selection strategies.
///
/// A strategy sees the population only through the rank and crowding distance
/// of each member and returns the indices of the selected members. The same
/// index may be selected more than once.
///
/// # Examples
///
/// ```
/// use mogep::pareto::CrowdedRank;
/// use mogep::rng::RandomNumberGenerator;
/// use mogep::selection::{SelectionStrategy, TournamentSelection};
///
/// let standings = vec![
///     CrowdedRank::new(1, f64::INFINITY),
///     CrowdedRank::new(2, 0.5),
///     CrowdedRank::new(1, 1.0),
/// ];
/// let mut rng = RandomNumberGenerator::from_seed(7);
///
/// let selected = TournamentSelection::default()
///     .select(&standings, 4, &mut rng)
///     .unwrap();
/// assert_eq!(selected.len(), 4);
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects `num_to_select` members.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if `standings` is empty.
    fn select(
        &self,
        standings: &[CrowdedRank],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>>;
}
