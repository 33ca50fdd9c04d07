//! # GepStrategy
//!
//! The standard GEP variation pipeline. Every selected parent is copied into
//! the offspring pool, which then passes through each operator stage in turn:
//!
//! inversion, IS transposition, RIS transposition, gene transposition,
//! mutation, one-point crossover, two-point crossover, gene crossover.
//!
//! Stages whose rate is 0 are skipped. IS and RIS draw a length per chromosome
//! from the configured length lists. Each crossover stage draws its own mating
//! pairs and replaces both parents by their children in place.

use std::sync::Arc;

use super::BreedStrategy;
use crate::{
    chromosome::Chromosome,
    error::{GeneticError, OptionExt, Result},
    evolution::options::EvolutionOptions,
    operators,
    rng::RandomNumberGenerator,
};

type Crossover = fn(
    &Arc<Chromosome>,
    &Arc<Chromosome>,
    &mut RandomNumberGenerator,
) -> Result<(Arc<Chromosome>, Arc<Chromosome>)>;

#[derive(Debug, Clone, Default)]
pub struct GepStrategy;

impl GepStrategy {
    pub fn new() -> Self {
        Self
    }
}

fn each(
    pool: &mut [Arc<Chromosome>],
    rng: &mut RandomNumberGenerator,
    mut op: impl FnMut(&Arc<Chromosome>, &mut RandomNumberGenerator) -> Result<Arc<Chromosome>>,
) -> Result<()> {
    for chromosome in pool.iter_mut() {
        *chromosome = op(chromosome, rng)?;
    }
    Ok(())
}

fn pick_length(lengths: &[usize], rng: &mut RandomNumberGenerator) -> Result<usize> {
    rng.choose(lengths).copied().ok_or_else_genetic(|| {
        GeneticError::Configuration("Transposition enabled without lengths".to_string())
    })
}

impl BreedStrategy for GepStrategy {
    fn breed(
        &self,
        parents: &[Arc<Chromosome>],
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Chromosome>>> {
        if parents.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        let mut pool = parents.to_vec();

        let rate = evol_options.get_inversion_rate();
        if rate > 0.0 {
            each(&mut pool, rng, |c, rng| operators::invert(c, rate, rng))?;
        }

        let rate = evol_options.get_is_transposition_rate();
        if rate > 0.0 {
            let lengths = evol_options.get_is_lengths();
            each(&mut pool, rng, |c, rng| {
                let length = pick_length(lengths, rng)?;
                operators::transpose_is(c, length, rate, rng)
            })?;
        }

        let rate = evol_options.get_ris_transposition_rate();
        if rate > 0.0 {
            let lengths = evol_options.get_ris_lengths();
            each(&mut pool, rng, |c, rng| {
                let length = pick_length(lengths, rng)?;
                operators::transpose_ris(c, length, rate, rng)
            })?;
        }

        let rate = evol_options.get_gene_transposition_rate();
        if rate > 0.0 {
            each(&mut pool, rng, |c, rng| operators::transpose_gene(c, rate, rng))?;
        }

        let rate = evol_options.get_mutation_rate();
        if rate > 0.0 {
            each(&mut pool, rng, |c, rng| operators::mutate(c, rate, rng))?;
        }

        let crossovers = [
            (
                evol_options.get_one_point_crossover_rate(),
                operators::crossover_one_point as Crossover,
            ),
            (
                evol_options.get_two_point_crossover_rate(),
                operators::crossover_two_points as Crossover,
            ),
            (
                evol_options.get_gene_crossover_rate(),
                operators::crossover_gene as Crossover,
            ),
        ];
        for (rate, crossover) in crossovers {
            if rate <= 0.0 {
                continue;
            }
            for (i, j) in operators::crossover_pairs(pool.len(), rate, rng)? {
                let (a, b) = crossover(&pool[i], &pool[j], rng)?;
                pool[i] = a;
                pool[j] = b;
            }
        }

        Ok(pool)
    }
}
