pub mod builder;
pub mod challenge;
pub mod launcher;
pub mod options;
pub mod population;

pub use builder::EvolutionLauncherBuilder;
pub use challenge::Challenge;
pub use launcher::{EvolutionLauncher, EvolutionResult};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
pub use population::Population;
