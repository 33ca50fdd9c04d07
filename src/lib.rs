pub mod chromosome;
pub mod error;
pub mod evolution;
pub mod functions;
pub mod gene;
pub mod operators;
pub mod pareto;
pub mod rng;
pub mod selection;
pub mod strategy;

// Re-export commonly used types for convenience
pub use chromosome::{Chromosome, Linker};
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{Challenge, EvolutionLauncher, EvolutionOptions, EvolutionResult, LogLevel};
pub use gene::{ColumnarDataset, Dataset, Gene, GeneKind, SymbolTable};
pub use pareto::{non_dominated_sort, SortAlgorithm};
pub use rng::RandomNumberGenerator;
