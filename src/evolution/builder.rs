use std::sync::Arc;

use crate::{
    chromosome::Linker,
    error::{GeneticError, Result},
    gene::{Dataset, SymbolTable},
    selection::{SelectionStrategy, TournamentSelection},
    strategy::{BreedStrategy, GepStrategy},
};

use super::{Challenge, EvolutionLauncher, EvolutionOptions};

/// Assembles an [`EvolutionLauncher`].
///
/// The symbol table, challenge and dataset are required. The linker defaults to
/// [`Linker::Identity`], the options to [`EvolutionOptions::default`], selection
/// to a binary [`TournamentSelection`] and breeding to [`GepStrategy`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use mogep::error::Result;
/// use mogep::evolution::{Challenge, EvolutionLauncher, EvolutionOptions};
/// use mogep::functions;
/// use mogep::gene::{ColumnarDataset, SymbolTable};
/// use mogep::rng::RandomNumberGenerator;
///
/// struct NearTen;
///
/// impl Challenge<ColumnarDataset> for NearTen {
///     fn num_objectives(&self) -> usize {
///         1
///     }
///
///     fn score(&self, outputs: &[Vec<f64>], _data: &ColumnarDataset) -> Result<Vec<f64>> {
///         Ok(vec![outputs[0].iter().map(|v| (v - 10.0).abs()).sum()])
///     }
/// }
///
/// let symbols = Arc::new(
///     SymbolTable::builder()
///         .functions(functions::arithmetic())
///         .terminal("x")
///         .build()?,
/// );
/// let data = ColumnarDataset::from_columns([("x", vec![1.0, 2.0, 3.0])])?;
///
/// let launcher = EvolutionLauncher::builder()
///     .with_symbols(symbols)
///     .with_challenge(NearTen)
///     .with_dataset(data)
///     .with_options(
///         EvolutionOptions::builder()
///             .population_size(20)
///             .num_generations(3)
///             .build(),
///     )
///     .build()?;
///
/// let result = launcher.evolve(&mut RandomNumberGenerator::from_seed(1))?;
/// assert!(!result.best_front.is_empty());
/// # Ok::<(), mogep::error::GeneticError>(())
/// ```
pub struct EvolutionLauncherBuilder<D, C, S = TournamentSelection, B = GepStrategy>
where
    D: Dataset,
    C: Challenge<D>,
    S: SelectionStrategy,
    B: BreedStrategy,
{
    symbols: Option<Arc<SymbolTable>>,
    challenge: Option<C>,
    dataset: Option<D>,
    linker: Linker,
    selection_strategy: Option<S>,
    breed_strategy: Option<B>,
    options: Option<EvolutionOptions>,
}

impl<D, C> EvolutionLauncherBuilder<D, C>
where
    D: Dataset,
    C: Challenge<D>,
{
    pub fn new() -> Self {
        Self {
            symbols: None,
            challenge: None,
            dataset: None,
            linker: Linker::default(),
            selection_strategy: Some(TournamentSelection::default()),
            breed_strategy: Some(GepStrategy::new()),
            options: None,
        }
    }
}

impl<D, C> Default for EvolutionLauncherBuilder<D, C>
where
    D: Dataset,
    C: Challenge<D>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D, C, S, B> EvolutionLauncherBuilder<D, C, S, B>
where
    D: Dataset,
    C: Challenge<D>,
    S: SelectionStrategy,
    B: BreedStrategy,
{
    pub fn with_symbols(mut self, symbols: Arc<SymbolTable>) -> Self {
        self.symbols = Some(symbols);
        self
    }

    pub fn with_challenge(mut self, challenge: C) -> Self {
        self.challenge = Some(challenge);
        self
    }

    pub fn with_dataset(mut self, dataset: D) -> Self {
        self.dataset = Some(dataset);
        self
    }

    pub fn with_linker(mut self, linker: Linker) -> Self {
        self.linker = linker;
        self
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_selection_strategy<S2: SelectionStrategy>(
        self,
        selection_strategy: S2,
    ) -> EvolutionLauncherBuilder<D, C, S2, B> {
        EvolutionLauncherBuilder {
            symbols: self.symbols,
            challenge: self.challenge,
            dataset: self.dataset,
            linker: self.linker,
            selection_strategy: Some(selection_strategy),
            breed_strategy: self.breed_strategy,
            options: self.options,
        }
    }

    pub fn with_breed_strategy<B2: BreedStrategy>(
        self,
        breed_strategy: B2,
    ) -> EvolutionLauncherBuilder<D, C, S, B2> {
        EvolutionLauncherBuilder {
            symbols: self.symbols,
            challenge: self.challenge,
            dataset: self.dataset,
            linker: self.linker,
            selection_strategy: self.selection_strategy,
            breed_strategy: Some(breed_strategy),
            options: self.options,
        }
    }

    pub fn build(self) -> Result<EvolutionLauncher<D, C, S, B>> {
        let symbols = self
            .symbols
            .ok_or_else(|| GeneticError::Configuration("Symbol table not specified".to_string()))?;

        let challenge = self
            .challenge
            .ok_or_else(|| GeneticError::Configuration("Challenge not specified".to_string()))?;

        let dataset = self
            .dataset
            .ok_or_else(|| GeneticError::Configuration("Dataset not specified".to_string()))?;

        let selection_strategy = self.selection_strategy.ok_or_else(|| {
            GeneticError::Configuration("Selection strategy not specified".to_string())
        })?;

        let breed_strategy = self.breed_strategy.ok_or_else(|| {
            GeneticError::Configuration("Breeding strategy not specified".to_string())
        })?;

        EvolutionLauncher::new(
            symbols,
            challenge,
            dataset,
            self.linker,
            selection_strategy,
            breed_strategy,
            self.options.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions;
    use crate::gene::ColumnarDataset;
    use crate::selection::UniformSelection;

    struct Dummy;

    impl Challenge<ColumnarDataset> for Dummy {
        fn num_objectives(&self) -> usize {
            1
        }

        fn score(&self, outputs: &[Vec<f64>], _data: &ColumnarDataset) -> Result<Vec<f64>> {
            Ok(vec![outputs[0].iter().sum()])
        }
    }

    fn symbols() -> Arc<SymbolTable> {
        Arc::new(
            SymbolTable::builder()
                .functions(functions::arithmetic())
                .terminal("x")
                .build()
                .unwrap(),
        )
    }

    fn data() -> ColumnarDataset {
        ColumnarDataset::from_columns([("x", vec![1.0])]).unwrap()
    }

    #[test]
    fn test_missing_symbols() {
        let result = EvolutionLauncherBuilder::<ColumnarDataset, Dummy>::new()
            .with_challenge(Dummy)
            .with_dataset(data())
            .build();

        match result {
            Err(GeneticError::Configuration(msg)) => {
                assert_eq!(msg, "Symbol table not specified");
            }
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_missing_challenge() {
        let result = EvolutionLauncherBuilder::<ColumnarDataset, Dummy>::new()
            .with_symbols(symbols())
            .with_dataset(data())
            .build();

        match result {
            Err(GeneticError::Configuration(msg)) => assert_eq!(msg, "Challenge not specified"),
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_missing_dataset() {
        let result = EvolutionLauncherBuilder::<ColumnarDataset, Dummy>::new()
            .with_symbols(symbols())
            .with_challenge(Dummy)
            .build();

        match result {
            Err(GeneticError::Configuration(msg)) => assert_eq!(msg, "Dataset not specified"),
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_complete_builder() {
        let launcher = EvolutionLauncher::builder()
            .with_symbols(symbols())
            .with_challenge(Dummy)
            .with_dataset(data())
            .with_linker(Linker::Sum)
            .with_selection_strategy(UniformSelection::new())
            .with_options(EvolutionOptions::builder().population_size(8).build())
            .build()
            .unwrap();
        assert_eq!(launcher.options().get_population_size(), 8);
    }

    #[test]
    fn test_invalid_options() {
        let result = EvolutionLauncher::builder()
            .with_symbols(symbols())
            .with_challenge(Dummy)
            .with_dataset(data())
            .with_options(EvolutionOptions::builder().num_elites(1000).build())
            .build();
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }
}
