//! # Genetic Operators
//!
//! The GEP variation operators. Every operator takes its parents by `Arc`, never
//! mutates them, and returns the very same `Arc` when its random draw fails or
//! its edit changes nothing. All edits go through [`Gene::derive`](crate::gene::Gene::derive),
//! which keeps functions out of the tails and recomputes coding lengths as needed.
//!
//! | Operator | Unit | Effect |
//! |---|---|---|
//! | [`mutate`] | allele | independent point replacement |
//! | [`invert`] | chromosome | reverses a head sub-range |
//! | [`transpose_is`] | chromosome | inserts a copied run at a non-root head position |
//! | [`transpose_ris`] | chromosome | inserts a run starting at a function at the root |
//! | [`transpose_gene`] | chromosome | moves a gene to the front |
//! | [`crossover_one_point`] | pair | exchanges one gene suffix |
//! | [`crossover_two_points`] | pair | exchanges a chromosome-wide segment |
//! | [`crossover_gene`] | pair | exchanges one whole gene |

pub mod crossover;
pub mod mutation;
pub mod transposition;

pub use crossover::{crossover_gene, crossover_one_point, crossover_pairs, crossover_two_points};
pub use mutation::{invert, mutate};
pub use transposition::{transpose_gene, transpose_is, transpose_ris};
