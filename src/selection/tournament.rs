use crate::error::{GeneticError, Result};
use crate::pareto::CrowdedRank;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// Crowded-comparison tournament selection.
///
/// Each tournament draws `tournament_size` members uniformly with replacement
/// and keeps the one with the lowest rank, breaking ties by the larger crowding
/// distance. The default size of 2 is the binary tournament of NSGA-II; a size
/// of 1 degenerates to uniform selection.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a tournament of the given size.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(Self { tournament_size })
    }

    pub fn with_tournament_size(self, tournament_size: usize) -> Result<Self> {
        Self::new(tournament_size)
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    fn run_tournament(&self, standings: &[CrowdedRank], rng: &mut RandomNumberGenerator) -> usize {
        let mut winner = rng.gen_index(standings.len());
        for _ in 1..self.tournament_size {
            let challenger = rng.gen_index(standings.len());
            if standings[challenger].is_preferred_over(&standings[winner]) {
                winner = challenger;
            }
        }
        winner
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 2 }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select(
        &self,
        standings: &[CrowdedRank],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        if standings.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        Ok((0..num_to_select)
            .map(|_| self.run_tournament(standings, rng))
            .collect())
    }
}
