//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds every parameter of a run: population
//! shape, operator rates, truncation and logging. Rates are probabilities in
//! `[0, 1]`; a rate of 0 disables its stage.
//!
//! ## Example
//!
//! ```rust
//! use mogep::evolution::options::{EvolutionOptions, LogLevel};
//!
//! let options = EvolutionOptions::builder()
//!     .num_generations(50)
//!     .population_size(60)
//!     .head_length(5)
//!     .num_genes(2)
//!     .mutation_rate(0.1)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! assert_eq!(options.get_population_size(), 60);
//! ```
//!
//! ## Defaults
//!
//! | Option | Default |
//! |---|---|
//! | generations | 100 |
//! | population size | 100 |
//! | head length / genes | 6 / 1 |
//! | mutation | 0.05 per allele |
//! | inversion, IS, RIS, gene transposition | 0.1 each |
//! | IS / RIS lengths | 1, 2, 3 |
//! | one-point / two-point / gene crossover | 0.3 / 0.3 / 0.1 |
//! | elites | 0 |
//! | parallel threshold | 1000 |
//! | initialization attempts | 10 000 |

use crate::error::{GeneticError, Result};
use crate::gene::GeneKind;
use crate::pareto::SortAlgorithm;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Verbose,
    Minimal,
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    num_generations: usize,
    log_level: LogLevel,
    population_size: usize,
    head_length: usize,
    num_genes: usize,
    gene_kind: GeneKind,
    mutation_rate: f64,
    inversion_rate: f64,
    is_transposition_rate: f64,
    is_lengths: Vec<usize>,
    ris_transposition_rate: f64,
    ris_lengths: Vec<usize>,
    gene_transposition_rate: f64,
    one_point_crossover_rate: f64,
    two_point_crossover_rate: f64,
    gene_crossover_rate: f64,
    num_elites: usize,
    /// Minimum number of chromosomes to evaluate in parallel
    parallel_threshold: usize,
    max_init_attempts: usize,
    sort_algorithm: SortAlgorithm,
}

impl EvolutionOptions {
    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_head_length(&self) -> usize {
        self.head_length
    }

    pub fn get_num_genes(&self) -> usize {
        self.num_genes
    }

    pub fn get_gene_kind(&self) -> GeneKind {
        self.gene_kind
    }

    /// Per-allele mutation probability.
    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_inversion_rate(&self) -> f64 {
        self.inversion_rate
    }

    pub fn get_is_transposition_rate(&self) -> f64 {
        self.is_transposition_rate
    }

    /// Candidate lengths for IS transposition, drawn uniformly.
    pub fn get_is_lengths(&self) -> &[usize] {
        &self.is_lengths
    }

    pub fn get_ris_transposition_rate(&self) -> f64 {
        self.ris_transposition_rate
    }

    /// Candidate lengths for RIS transposition, drawn uniformly.
    pub fn get_ris_lengths(&self) -> &[usize] {
        &self.ris_lengths
    }

    pub fn get_gene_transposition_rate(&self) -> f64 {
        self.gene_transposition_rate
    }

    pub fn get_one_point_crossover_rate(&self) -> f64 {
        self.one_point_crossover_rate
    }

    pub fn get_two_point_crossover_rate(&self) -> f64 {
        self.two_point_crossover_rate
    }

    pub fn get_gene_crossover_rate(&self) -> f64 {
        self.gene_crossover_rate
    }

    /// Number of front-1 members carried over verbatim each generation.
    pub fn get_num_elites(&self) -> usize {
        self.num_elites
    }

    /// Returns the minimum number of chromosomes to evaluate in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Maximum number of random chromosomes drawn to fill the initial population.
    pub fn get_max_init_attempts(&self) -> usize {
        self.max_init_attempts
    }

    pub fn get_sort_algorithm(&self) -> SortAlgorithm {
        self.sort_algorithm
    }

    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_head_length(&mut self, head_length: usize) {
        self.head_length = head_length;
    }

    pub fn set_num_genes(&mut self, num_genes: usize) {
        self.num_genes = num_genes;
    }

    pub fn set_gene_kind(&mut self, gene_kind: GeneKind) {
        self.gene_kind = gene_kind;
    }

    pub fn set_mutation_rate(&mut self, rate: f64) {
        self.mutation_rate = rate;
    }

    pub fn set_inversion_rate(&mut self, rate: f64) {
        self.inversion_rate = rate;
    }

    pub fn set_is_transposition(&mut self, rate: f64, lengths: Vec<usize>) {
        self.is_transposition_rate = rate;
        self.is_lengths = lengths;
    }

    pub fn set_ris_transposition(&mut self, rate: f64, lengths: Vec<usize>) {
        self.ris_transposition_rate = rate;
        self.ris_lengths = lengths;
    }

    pub fn set_gene_transposition_rate(&mut self, rate: f64) {
        self.gene_transposition_rate = rate;
    }

    pub fn set_one_point_crossover_rate(&mut self, rate: f64) {
        self.one_point_crossover_rate = rate;
    }

    pub fn set_two_point_crossover_rate(&mut self, rate: f64) {
        self.two_point_crossover_rate = rate;
    }

    pub fn set_gene_crossover_rate(&mut self, rate: f64) {
        self.gene_crossover_rate = rate;
    }

    pub fn set_num_elites(&mut self, num_elites: usize) {
        self.num_elites = num_elites;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    pub fn set_max_init_attempts(&mut self, attempts: usize) {
        self.max_init_attempts = attempts;
    }

    pub fn set_sort_algorithm(&mut self, algorithm: SortAlgorithm) {
        self.sort_algorithm = algorithm;
    }

    /// Checks that the options describe a runnable configuration.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the population, head length or gene
    /// count is zero, a rate is outside `[0, 1]`, an enabled transposition has
    /// no usable lengths, there are more elites than population members, or the
    /// initialization budget is smaller than the population.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        if self.head_length == 0 {
            return Err(GeneticError::Configuration(
                "Head length cannot be zero".to_string(),
            ));
        }
        if self.num_genes == 0 {
            return Err(GeneticError::Configuration(
                "Number of genes cannot be zero".to_string(),
            ));
        }

        let rates = [
            ("mutation", self.mutation_rate),
            ("inversion", self.inversion_rate),
            ("IS transposition", self.is_transposition_rate),
            ("RIS transposition", self.ris_transposition_rate),
            ("gene transposition", self.gene_transposition_rate),
            ("one-point crossover", self.one_point_crossover_rate),
            ("two-point crossover", self.two_point_crossover_rate),
            ("gene crossover", self.gene_crossover_rate),
        ];
        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(GeneticError::Configuration(format!(
                    "The {} rate must be in [0, 1], got {}",
                    name, rate
                )));
            }
        }

        let lengths = [
            ("IS", self.is_transposition_rate, &self.is_lengths),
            ("RIS", self.ris_transposition_rate, &self.ris_lengths),
        ];
        for (name, rate, lengths) in lengths {
            if rate > 0.0 && (lengths.is_empty() || lengths.contains(&0)) {
                return Err(GeneticError::Configuration(format!(
                    "{} transposition needs at least one length, all positive",
                    name
                )));
            }
        }

        if self.num_elites > self.population_size {
            return Err(GeneticError::Configuration(format!(
                "Cannot keep {} elites in a population of {}",
                self.num_elites, self.population_size
            )));
        }
        if self.max_init_attempts < self.population_size {
            return Err(GeneticError::Configuration(format!(
                "An initialization budget of {} attempts cannot fill a population of {}",
                self.max_init_attempts, self.population_size
            )));
        }
        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        EvolutionOptionsBuilder::default().build()
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
/// Unset fields take the defaults listed in the module documentation.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    log_level: Option<LogLevel>,
    population_size: Option<usize>,
    head_length: Option<usize>,
    num_genes: Option<usize>,
    gene_kind: Option<GeneKind>,
    mutation_rate: Option<f64>,
    inversion_rate: Option<f64>,
    is_transposition: Option<(f64, Vec<usize>)>,
    ris_transposition: Option<(f64, Vec<usize>)>,
    gene_transposition_rate: Option<f64>,
    one_point_crossover_rate: Option<f64>,
    two_point_crossover_rate: Option<f64>,
    gene_crossover_rate: Option<f64>,
    num_elites: Option<usize>,
    parallel_threshold: Option<usize>,
    max_init_attempts: Option<usize>,
    sort_algorithm: Option<SortAlgorithm>,
}

impl EvolutionOptionsBuilder {
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn head_length(mut self, value: usize) -> Self {
        self.head_length = Some(value);
        self
    }

    pub fn num_genes(mut self, value: usize) -> Self {
        self.num_genes = Some(value);
        self
    }

    pub fn gene_kind(mut self, value: GeneKind) -> Self {
        self.gene_kind = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn inversion_rate(mut self, value: f64) -> Self {
        self.inversion_rate = Some(value);
        self
    }

    pub fn is_transposition(mut self, rate: f64, lengths: Vec<usize>) -> Self {
        self.is_transposition = Some((rate, lengths));
        self
    }

    pub fn ris_transposition(mut self, rate: f64, lengths: Vec<usize>) -> Self {
        self.ris_transposition = Some((rate, lengths));
        self
    }

    pub fn gene_transposition_rate(mut self, value: f64) -> Self {
        self.gene_transposition_rate = Some(value);
        self
    }

    pub fn one_point_crossover_rate(mut self, value: f64) -> Self {
        self.one_point_crossover_rate = Some(value);
        self
    }

    pub fn two_point_crossover_rate(mut self, value: f64) -> Self {
        self.two_point_crossover_rate = Some(value);
        self
    }

    pub fn gene_crossover_rate(mut self, value: f64) -> Self {
        self.gene_crossover_rate = Some(value);
        self
    }

    pub fn num_elites(mut self, value: usize) -> Self {
        self.num_elites = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn max_init_attempts(mut self, value: usize) -> Self {
        self.max_init_attempts = Some(value);
        self
    }

    pub fn sort_algorithm(mut self, value: SortAlgorithm) -> Self {
        self.sort_algorithm = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    ///
    /// Values are not checked here; see [`EvolutionOptions::validate`].
    pub fn build(self) -> EvolutionOptions {
        let (is_transposition_rate, is_lengths) =
            self.is_transposition.unwrap_or_else(|| (0.1, vec![1, 2, 3]));
        let (ris_transposition_rate, ris_lengths) =
            self.ris_transposition.unwrap_or_else(|| (0.1, vec![1, 2, 3]));

        EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(100),
            log_level: self.log_level.unwrap_or(LogLevel::None),
            population_size: self.population_size.unwrap_or(100),
            head_length: self.head_length.unwrap_or(6),
            num_genes: self.num_genes.unwrap_or(1),
            gene_kind: self.gene_kind.unwrap_or_default(),
            mutation_rate: self.mutation_rate.unwrap_or(0.05),
            inversion_rate: self.inversion_rate.unwrap_or(0.1),
            is_transposition_rate,
            is_lengths,
            ris_transposition_rate,
            ris_lengths,
            gene_transposition_rate: self.gene_transposition_rate.unwrap_or(0.1),
            one_point_crossover_rate: self.one_point_crossover_rate.unwrap_or(0.3),
            two_point_crossover_rate: self.two_point_crossover_rate.unwrap_or(0.3),
            gene_crossover_rate: self.gene_crossover_rate.unwrap_or(0.1),
            num_elites: self.num_elites.unwrap_or(0),
            parallel_threshold: self.parallel_threshold.unwrap_or(1000),
            max_init_attempts: self.max_init_attempts.unwrap_or(10_000),
            sort_algorithm: self.sort_algorithm.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EvolutionOptions::default();
        assert_eq!(options.get_num_generations(), 100);
        assert_eq!(options.get_population_size(), 100);
        assert_eq!(options.get_head_length(), 6);
        assert_eq!(options.get_is_lengths(), &[1, 2, 3]);
        assert_eq!(*options.get_log_level(), LogLevel::None);
        assert_eq!(options.get_sort_algorithm(), SortAlgorithm::Auto);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_setters() {
        let mut options = EvolutionOptions::default();
        options.set_population_size(10);
        options.set_is_transposition(0.5, vec![4]);
        options.set_num_elites(3);
        assert_eq!(options.get_population_size(), 10);
        assert_eq!(options.get_is_transposition_rate(), 0.5);
        assert_eq!(options.get_is_lengths(), &[4]);
        assert_eq!(options.get_num_elites(), 3);
    }

    #[test]
    fn test_validate_rates() {
        let options = EvolutionOptions::builder().mutation_rate(1.5).build();
        match options.validate() {
            Err(GeneticError::Configuration(msg)) => assert!(msg.contains("mutation")),
            _ => panic!("Expected Configuration error"),
        }

        let options = EvolutionOptions::builder().gene_crossover_rate(f64::NAN).build();
        assert!(options.validate().is_err());

        let options = EvolutionOptions::builder()
            .inversion_rate(0.0)
            .one_point_crossover_rate(0.0)
            .build();
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_shape() {
        assert!(EvolutionOptions::builder().population_size(0).build().validate().is_err());
        assert!(EvolutionOptions::builder().head_length(0).build().validate().is_err());
        assert!(EvolutionOptions::builder().num_genes(0).build().validate().is_err());
        assert!(EvolutionOptions::builder()
            .population_size(5)
            .num_elites(6)
            .build()
            .validate()
            .is_err());
        assert!(EvolutionOptions::builder()
            .population_size(50)
            .max_init_attempts(49)
            .build()
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_transposition_lengths() {
        let options = EvolutionOptions::builder().is_transposition(0.1, vec![]).build();
        assert!(options.validate().is_err());

        let options = EvolutionOptions::builder().ris_transposition(0.1, vec![2, 0]).build();
        assert!(options.validate().is_err());

        // A disabled stage needs no lengths.
        let options = EvolutionOptions::builder().ris_transposition(0.0, vec![]).build();
        assert!(options.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let options = EvolutionOptions::builder()
            .population_size(40)
            .gene_kind(GeneKind::Prefix)
            .sort_algorithm(SortAlgorithm::Naive)
            .build();
        let json = serde_json::to_string(&options).unwrap();
        let restored: EvolutionOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, options);
    }
}
