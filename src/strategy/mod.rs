//! # BreedStrategy
//!
//! The `BreedStrategy` trait defines the interface for strategies that turn a
//! set of selected parents into the same number of offspring.
pub mod gep;

use std::fmt::Debug;
use std::sync::Arc;

use crate::{
    chromosome::Chromosome, error::Result, evolution::options::EvolutionOptions,
    rng::RandomNumberGenerator,
};

/// # BreedStrategy
///
/// Produces offspring from selected parents. Parents are shared and never
/// modified; offspring that no operator touched are the parents' own `Arc`s.
pub trait BreedStrategy
where
    Self: Debug + Clone + Send + Sync,
{
    /// Breeds one offspring per parent.
    ///
    /// ## Errors
    ///
    /// This method can fail if:
    /// - The parents slice is empty
    /// - An operator is misconfigured (for example a crossover rate above 1)
    /// - Two parents have different shapes
    fn breed(
        &self,
        parents: &[Arc<Chromosome>],
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Chromosome>>>;
}

pub use gep::GepStrategy;
