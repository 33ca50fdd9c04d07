use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use super::{
    builder::EvolutionLauncherBuilder,
    challenge::Challenge,
    options::{EvolutionOptions, LogLevel},
    population::Population,
};
use crate::{
    chromosome::{Chromosome, Linker},
    error::{GeneticError, Result},
    gene::{Dataset, SymbolTable},
    pareto::{assign_crowding_distance, non_dominated_sort, CrowdedRank, Objectives},
    rng::RandomNumberGenerator,
    selection::{SelectionStrategy, TournamentSelection},
    strategy::{BreedStrategy, GepStrategy},
};

/// The outcome of a run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Front 1 of the final population.
    pub best_front: Vec<Arc<Chromosome>>,
    /// The final population, ranked.
    pub population: Population,
    /// Number of generations run after the initial population.
    pub generations: usize,
    /// Whether the run stopped because every best-front member was solved.
    pub solved: bool,
}

/// Runs NSGA-II over GEP chromosomes.
///
/// Each generation selects parents by crowded comparison, breeds one offspring
/// per parent, evaluates parents and offspring together and keeps the best
/// half by Pareto rank and crowding distance.
#[derive(Debug)]
pub struct EvolutionLauncher<D, C, S = TournamentSelection, B = GepStrategy>
where
    D: Dataset,
    C: Challenge<D>,
    S: SelectionStrategy,
    B: BreedStrategy,
{
    symbols: Arc<SymbolTable>,
    challenge: C,
    dataset: D,
    linker: Linker,
    selection_strategy: S,
    breed_strategy: B,
    options: EvolutionOptions,
}

impl<D, C> EvolutionLauncher<D, C>
where
    D: Dataset,
    C: Challenge<D>,
{
    /// Returns a builder with tournament selection and the standard GEP operators.
    pub fn builder() -> EvolutionLauncherBuilder<D, C> {
        EvolutionLauncherBuilder::new()
    }
}

impl<D, C, S, B> EvolutionLauncher<D, C, S, B>
where
    D: Dataset,
    C: Challenge<D>,
    S: SelectionStrategy,
    B: BreedStrategy,
{
    /// Creates a launcher.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `options` do not validate.
    pub fn new(
        symbols: Arc<SymbolTable>,
        challenge: C,
        dataset: D,
        linker: Linker,
        selection_strategy: S,
        breed_strategy: B,
        options: EvolutionOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            symbols,
            challenge,
            dataset,
            linker,
            selection_strategy,
            breed_strategy,
            options,
        })
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn challenge(&self) -> &C {
        &self.challenge
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    /// Evaluates every chromosome that has no cached fitness yet.
    ///
    /// Batches of at least `parallel_threshold` chromosomes are evaluated in
    /// parallel.
    pub fn evaluate(&self, chromosomes: &[Arc<Chromosome>]) -> Result<()> {
        let evaluate = |chromosome: &Arc<Chromosome>| {
            chromosome
                .evaluate_fitness(&self.challenge, &self.dataset)
                .map(|_| ())
        };

        if chromosomes.len() >= self.options.get_parallel_threshold() {
            chromosomes.par_iter().try_for_each(evaluate)
        } else {
            chromosomes.iter().try_for_each(evaluate)
        }
    }

    /// Creates, evaluates and ranks the initial population.
    ///
    /// Chromosomes whose objectives are all exactly zero are redrawn.
    ///
    /// # Errors
    ///
    /// Returns `MaxAttemptsReached` if the population cannot be filled within
    /// the configured number of draws.
    pub fn initial_population(&self, rng: &mut RandomNumberGenerator) -> Result<Population> {
        let size = self.options.get_population_size();
        let budget = self.options.get_max_init_attempts();
        let mut accepted: Vec<Arc<Chromosome>> = Vec::with_capacity(size);
        let mut attempts = 0;

        while accepted.len() < size {
            let batch_size = (size - accepted.len()).min(budget - attempts);
            if batch_size == 0 {
                return Err(GeneticError::MaxAttemptsReached(format!(
                    "Only {} of {} valid chromosomes after {} draws",
                    accepted.len(),
                    size,
                    attempts
                )));
            }
            attempts += batch_size;

            let batch = (0..batch_size)
                .map(|_| {
                    Chromosome::random(
                        &self.symbols,
                        self.options.get_head_length(),
                        self.options.get_num_genes(),
                        self.options.get_gene_kind(),
                        self.linker.clone(),
                        rng,
                    )
                    .map(Arc::new)
                })
                .collect::<Result<Vec<_>>>()?;
            self.evaluate(&batch)?;
            accepted.extend(batch.into_iter().filter(|c| !c.is_degenerate()));
        }

        Population::ranked(accepted, 0, self.options.get_sort_algorithm())
    }

    /// Runs one NSGA-II generation.
    ///
    /// # Errors
    ///
    /// Returns an `Evolution` error if the breed strategy does not return one
    /// offspring per parent, and propagates selection, breeding and evaluation
    /// errors.
    pub fn next_generation(
        &self,
        population: &Population,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population> {
        let size = self.options.get_population_size();

        let selected = self
            .selection_strategy
            .select(&population.standings(), size, rng)?;
        let parents: Vec<Arc<Chromosome>> = selected
            .iter()
            .map(|&idx| Arc::clone(&population.chromosomes()[idx]))
            .collect();
        let offspring = self.breed_strategy.breed(&parents, &self.options, rng)?;

        let mut merged = population.chromosomes().to_vec();
        merged.extend(offspring);
        if merged.len() != 2 * size {
            return Err(GeneticError::Evolution(format!(
                "Merged population has {} members, expected {}",
                merged.len(),
                2 * size
            )));
        }

        self.evaluate(&merged)?;
        let survivors = self.truncate(&merged, size)?;
        let next: Vec<Arc<Chromosome>> = survivors
            .into_iter()
            .map(|idx| Arc::clone(&merged[idx]))
            .collect();

        Population::ranked(
            next,
            population.generation() + 1,
            self.options.get_sort_algorithm(),
        )
    }

    /// Picks `size` indices of `merged`: elites first, then whole fronts, then
    /// the least crowded members of the first front that does not fit.
    fn truncate(&self, merged: &[Arc<Chromosome>], size: usize) -> Result<Vec<usize>> {
        let fronts = non_dominated_sort(merged, self.options.get_sort_algorithm())?;

        let mut chosen = elites(merged, fronts.first(), self.options.get_num_elites());
        let mut taken = vec![false; merged.len()];
        for &idx in &chosen {
            taken[idx] = true;
        }

        let mut distances = vec![0.0; merged.len()];
        for (rank, front) in fronts.fronts().iter().enumerate() {
            if chosen.len() >= size {
                break;
            }
            let mut remaining: Vec<usize> =
                front.iter().copied().filter(|&idx| !taken[idx]).collect();

            if chosen.len() + remaining.len() > size {
                assign_crowding_distance(merged, front, &mut distances);
                remaining.sort_by(|&a, &b| {
                    CrowdedRank::new(rank + 1, distances[a])
                        .crowded_cmp(&CrowdedRank::new(rank + 1, distances[b]))
                });
                remaining.truncate(size - chosen.len());
            }
            chosen.extend(remaining);
        }

        Ok(chosen)
    }

    fn is_solved(&self, population: &Population) -> bool {
        let best = population.best_front();
        !best.is_empty() && best.iter().all(|c| self.challenge.solved(c))
    }

    fn log_generation(&self, population: &Population, started: Instant) {
        match self.options.get_log_level() {
            LogLevel::None => {}
            LogLevel::Minimal => {
                info!(
                    generation = population.generation(),
                    best_front = population.fronts().first().len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Generation complete"
                );
            }
            LogLevel::Verbose => {
                info!(
                    generation = population.generation(),
                    best_front = population.fronts().first().len(),
                    fronts = population.fronts().len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Generation complete"
                );
                for chromosome in population.best_front() {
                    debug!(
                        generation = population.generation(),
                        chromosome = %chromosome,
                        objectives = ?chromosome.objectives(),
                        "Best front member"
                    );
                }
            }
        }
    }

    /// Evolves a random initial population.
    ///
    /// Stops after the configured number of generations, or earlier once every
    /// best-front member is solved.
    pub fn evolve(&self, rng: &mut RandomNumberGenerator) -> Result<EvolutionResult> {
        let started = Instant::now();
        let mut population = self.initial_population(rng)?;
        self.log_generation(&population, started);

        let mut solved = self.is_solved(&population);
        while !solved && population.generation() < self.options.get_num_generations() {
            population = self.next_generation(&population, rng)?;
            self.log_generation(&population, started);
            solved = self.is_solved(&population);
        }

        Ok(EvolutionResult {
            best_front: population.best_front(),
            generations: population.generation(),
            population,
            solved,
        })
    }
}

/// The best member of front 1 for each objective in turn, `count` in all or
/// until the front runs out.
fn elites(merged: &[Arc<Chromosome>], front: &[usize], count: usize) -> Vec<usize> {
    let mut pool = front.to_vec();
    let mut chosen = Vec::with_capacity(count.min(pool.len()));
    let Some(&first) = pool.first() else {
        return chosen;
    };
    let objectives = merged[first].objectives().len().max(1);

    while chosen.len() < count {
        let objective = chosen.len() % objectives;
        let best = pool.iter().enumerate().min_by(|&(_, &a), &(_, &b)| {
            merged[a].objectives()[objective]
                .partial_cmp(&merged[b].objectives()[objective])
                .unwrap_or(Ordering::Equal)
        });
        let Some((pos, _)) = best else {
            break;
        };
        chosen.push(pool.swap_remove(pos));
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions;
    use crate::gene::ColumnarDataset;
    use crate::selection::UniformSelection;

    /// Output at the single row, and its distance from 2.
    struct Tradeoff;

    impl Challenge<ColumnarDataset> for Tradeoff {
        fn num_objectives(&self) -> usize {
            2
        }

        fn score(&self, outputs: &[Vec<f64>], _data: &ColumnarDataset) -> Result<Vec<f64>> {
            let value = outputs[0][0];
            Ok(vec![value * value, (value - 2.0).powi(2)])
        }
    }

    /// Always zero, so every chromosome is degenerate.
    struct Zero;

    impl Challenge<ColumnarDataset> for Zero {
        fn num_objectives(&self) -> usize {
            1
        }

        fn score(&self, _outputs: &[Vec<f64>], _data: &ColumnarDataset) -> Result<Vec<f64>> {
            Ok(vec![0.0])
        }
    }

    fn symbols() -> Arc<SymbolTable> {
        Arc::new(
            SymbolTable::builder()
                .functions(functions::arithmetic())
                .terminal("x")
                .constants(-2.0, 2.0)
                .build()
                .unwrap(),
        )
    }

    fn data() -> ColumnarDataset {
        ColumnarDataset::from_columns([("x", vec![1.5])]).unwrap()
    }

    fn options(population: usize) -> EvolutionOptions {
        EvolutionOptions::builder()
            .population_size(population)
            .num_generations(5)
            .head_length(3)
            .build()
    }

    #[test]
    fn test_next_generation_keeps_size() {
        let launcher = EvolutionLauncher::new(
            symbols(),
            Tradeoff,
            data(),
            Linker::Identity,
            TournamentSelection::default(),
            GepStrategy::new(),
            options(20),
        )
        .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(5);

        let mut population = launcher.initial_population(&mut rng).unwrap();
        assert_eq!(population.len(), 20);
        assert_eq!(population.generation(), 0);
        for generation in 1..=3 {
            population = launcher.next_generation(&population, &mut rng).unwrap();
            assert_eq!(population.len(), 20);
            assert_eq!(population.generation(), generation);
            assert!(population.chromosomes().iter().all(|c| c.fitnesses().is_some()));
        }
    }

    #[test]
    fn test_best_front_never_regresses() {
        let launcher = EvolutionLauncher::new(
            symbols(),
            Tradeoff,
            data(),
            Linker::Identity,
            UniformSelection::new(),
            GepStrategy::new(),
            options(16),
        )
        .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(8);

        let mut population = launcher.initial_population(&mut rng).unwrap();
        for _ in 0..4 {
            let previous = population.best_front();
            population = launcher.next_generation(&population, &mut rng).unwrap();
            let current = population.best_front();
            // Nothing from the old best front can dominate the new one.
            for old in &previous {
                assert!(current.iter().all(|new| !old.dominates(new)));
            }
        }
    }

    #[test]
    fn test_degenerate_population_exhausts_budget() {
        let options = EvolutionOptions::builder()
            .population_size(5)
            .max_init_attempts(20)
            .build();
        let launcher = EvolutionLauncher::new(
            symbols(),
            Zero,
            data(),
            Linker::Identity,
            TournamentSelection::default(),
            GepStrategy::new(),
            options,
        )
        .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(1);
        match launcher.initial_population(&mut rng) {
            Err(GeneticError::MaxAttemptsReached(msg)) => assert!(msg.contains("20 draws")),
            _ => panic!("Expected MaxAttemptsReached"),
        }
    }

    /// All-zero for chromosomes that just return `x`, such as a bare terminal root.
    struct ZeroWhenIdentity;

    impl Challenge<ColumnarDataset> for ZeroWhenIdentity {
        fn num_objectives(&self) -> usize {
            2
        }

        fn score(&self, outputs: &[Vec<f64>], _data: &ColumnarDataset) -> Result<Vec<f64>> {
            let value = outputs[0][0];
            if value == 1.5 {
                Ok(vec![0.0, 0.0])
            } else {
                Ok(vec![value.abs() + 1.0, 1.0])
            }
        }
    }

    #[test]
    fn test_degenerate_draws_are_redrawn() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let degenerate = (0..100)
            .map(|_| {
                let c = Chromosome::random(
                    &symbols(),
                    3,
                    1,
                    crate::gene::GeneKind::Karva,
                    Linker::Identity,
                    &mut rng,
                )
                .unwrap();
                c.evaluate_fitness(&ZeroWhenIdentity, &data()).unwrap();
                c.is_degenerate()
            })
            .filter(|&d| d)
            .count();
        assert!(degenerate > 0 && degenerate < 100);

        let launcher = EvolutionLauncher::new(
            symbols(),
            ZeroWhenIdentity,
            data(),
            Linker::Identity,
            TournamentSelection::default(),
            GepStrategy::new(),
            EvolutionOptions::builder()
                .population_size(40)
                .head_length(3)
                .build(),
        )
        .unwrap();
        let population = launcher.initial_population(&mut rng).unwrap();
        assert_eq!(population.len(), 40);
        assert_eq!(population.generation(), 0);
        assert!(population.chromosomes().iter().all(|c| !c.is_degenerate()));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let result = EvolutionLauncher::new(
            symbols(),
            Tradeoff,
            data(),
            Linker::Identity,
            TournamentSelection::default(),
            GepStrategy::new(),
            EvolutionOptions::builder().mutation_rate(2.0).build(),
        );
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_elites_round_robin() {
        let table = symbols();
        let x = table.terminal("x").unwrap();
        let make = |value: f64| {
            let gene = crate::gene::Gene::with_constants(
                Arc::clone(&table),
                vec![crate::gene::Allele::Constant, x, x, x, x, x, x],
                3,
                crate::gene::GeneKind::Karva,
                vec![value, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0].into(),
            )
            .unwrap();
            let c = Arc::new(Chromosome::new(vec![Arc::new(gene)], 3, Linker::Identity).unwrap());
            c.evaluate_fitness(&Tradeoff, &data()).unwrap();
            c
        };
        // Objectives (v², (v-2)²): 0.0 is best on the first, 2.0 on the second.
        let merged = vec![make(1.0), make(0.0), make(2.0), make(0.5)];
        assert_eq!(elites(&merged, &[0, 1, 2, 3], 2), vec![1, 2]);
        assert_eq!(elites(&merged, &[0, 1], 5).len(), 2);
        assert!(elites(&merged, &[], 3).is_empty());
    }

    #[test]
    fn test_evolve_runs_all_generations() {
        let launcher = EvolutionLauncher::new(
            symbols(),
            Tradeoff,
            data(),
            Linker::Identity,
            TournamentSelection::default(),
            GepStrategy::new(),
            options(12),
        )
        .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(3);
        let result = launcher.evolve(&mut rng).unwrap();
        assert_eq!(result.generations, 5);
        assert!(!result.solved);
        assert!(!result.best_front.is_empty());
        assert_eq!(result.population.len(), 12);
    }
}
