//! # Error Types
//!
//! This module defines the error type shared by every part of the library.
//! Construction of illegal genes, contract violations in the evolution loop and
//! misconfigured launchers all surface as a [`GeneticError`].
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use mogep::error::{GeneticError, Result};
//!
//! fn check_head(head_length: usize) -> Result<usize> {
//!     if head_length == 0 {
//!         return Err(GeneticError::IllegalGene("head length must be positive".to_string()));
//!     }
//!     Ok(head_length)
//! }
//!
//! assert!(check_head(0).is_err());
//! assert_eq!(check_head(4).unwrap(), 4);
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use mogep::error::{GeneticError, OptionExt};
//!
//! fn first_front(fronts: &[Vec<usize>]) -> mogep::error::Result<&Vec<usize>> {
//!     fronts.first().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert!(first_front(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while building or evolving GEP populations.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// A gene violates the head/tail layout or references unknown symbols.
    #[error("Illegal gene: {0}")]
    IllegalGene(String),

    /// A gene could not be evaluated against the dataset.
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// An internal contract of the generational loop was broken.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// The fitness function returned something the ranker cannot use.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when a maximum number of attempts is reached.
    #[error("Maximum attempts reached: {0}")]
    MaxAttemptsReached(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T>` using `err_fn` to build the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
