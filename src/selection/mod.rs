pub mod selection_strategy;
pub mod tournament;
pub mod uniform;

pub use selection_strategy::SelectionStrategy;
pub use tournament::TournamentSelection;
pub use uniform::UniformSelection;
