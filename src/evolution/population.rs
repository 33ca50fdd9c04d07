//! # Population
//!
//! One generation of evaluated chromosomes together with its Pareto fronts
//! and crowding distances. Ranks and distances are stored in arrays indexed
//! like the chromosomes, never on the chromosomes themselves, so the same
//! chromosome can appear in several populations.

use std::sync::Arc;

use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::pareto::{
    assign_crowding_distance, non_dominated_sort, CrowdedRank, ParetoFronts, SortAlgorithm,
};

#[derive(Debug, Clone)]
pub struct Population {
    chromosomes: Vec<Arc<Chromosome>>,
    generation: usize,
    fronts: ParetoFronts,
    distances: Vec<f64>,
}

impl Population {
    /// Ranks evaluated chromosomes and computes their crowding distances.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if a chromosome has not been evaluated
    /// or the objective counts differ.
    pub fn ranked(
        chromosomes: Vec<Arc<Chromosome>>,
        generation: usize,
        algorithm: SortAlgorithm,
    ) -> Result<Self> {
        let fronts = non_dominated_sort(&chromosomes, algorithm)?;
        let mut distances = vec![0.0; chromosomes.len()];
        for front in fronts.fronts() {
            assign_crowding_distance(&chromosomes, front, &mut distances);
        }
        Ok(Self {
            chromosomes,
            generation,
            fronts,
            distances,
        })
    }

    pub fn chromosomes(&self) -> &[Arc<Chromosome>] {
        &self.chromosomes
    }

    /// Number of generations since the initial population.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn fronts(&self) -> &ParetoFronts {
        &self.fronts
    }

    pub fn rank(&self, idx: usize) -> usize {
        self.fronts.rank(idx)
    }

    pub fn distance(&self, idx: usize) -> f64 {
        self.distances[idx]
    }

    /// Rank and crowding distance of every member, in population order.
    pub fn standings(&self) -> Vec<CrowdedRank> {
        self.fronts
            .ranks()
            .iter()
            .zip(&self.distances)
            .map(|(&rank, &distance)| CrowdedRank::new(rank, distance))
            .collect()
    }

    /// The members of front 1.
    pub fn best_front(&self) -> Vec<Arc<Chromosome>> {
        self.fronts
            .first()
            .iter()
            .map(|&idx| Arc::clone(&self.chromosomes[idx]))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }
}
