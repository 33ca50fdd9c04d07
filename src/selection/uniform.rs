use crate::error::{GeneticError, Result};
use crate::pareto::CrowdedRank;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// Selects members uniformly at random, ignoring rank and distance.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct UniformSelection;

impl UniformSelection {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionStrategy for UniformSelection {
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
            .map(|_| rng.gen_index(standings.len()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_selection() {
        let standings = vec![CrowdedRank::new(1, 0.0); 5];
        let mut rng = RandomNumberGenerator::from_seed(10);
        let selected = UniformSelection::new().select(&standings, 500, &mut rng).unwrap();
        assert_eq!(selected.len(), 500);
        for idx in 0..5 {
            assert!(selected.contains(&idx));
        }
    }

    #[test]
    fn test_empty_population() {
        let mut rng = RandomNumberGenerator::from_seed(10);
        assert!(UniformSelection::new().select(&[], 1, &mut rng).is_err());
    }
}
