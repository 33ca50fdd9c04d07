//! # Linker
//!
//! A linker combines the per-gene evaluation results of a chromosome into the
//! chromosome's output. Outputs are a list of columns so that the identity
//! linker can hand every gene's result to a multi-objective fitness function.

use std::fmt;
use std::sync::Arc;

/// Per-gene columns in, chromosome output columns out.
pub type LinkFn = dyn Fn(Vec<Vec<f64>>) -> Vec<Vec<f64>> + Send + Sync;

/// Combines gene results into the chromosome output.
#[derive(Clone, Default)]
pub enum Linker {
    /// Every gene result, in gene order.
    #[default]
    Identity,
    /// Row-wise sum of the gene results.
    Sum,
    /// 1.0 where every gene result is non-zero, else 0.0.
    And,
    /// 1.0 where any gene result is non-zero, else 0.0.
    Or,
    /// A user-supplied combinator.
    Custom(Arc<LinkFn>),
}

impl Linker {
    /// Wraps a closure as a custom linker.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Vec<Vec<f64>>) -> Vec<Vec<f64>> + Send + Sync + 'static,
    {
        Linker::Custom(Arc::new(f))
    }

    /// Reduces the gene results.
    pub fn link(&self, results: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
        match self {
            Linker::Identity => results,
            Linker::Sum => vec![reduce(&results, 0.0, |acc, v| acc + v)],
            Linker::And => vec![reduce(&results, 1.0, |acc, v| {
                if acc != 0.0 && v != 0.0 {
                    1.0
                } else {
                    0.0
                }
            })],
            Linker::Or => vec![reduce(&results, 0.0, |acc, v| {
                if acc != 0.0 || v != 0.0 {
                    1.0
                } else {
                    0.0
                }
            })],
            Linker::Custom(f) => f(results),
        }
    }
}

fn reduce(results: &[Vec<f64>], init: f64, op: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    let rows = results.iter().map(Vec::len).min().unwrap_or(0);
    (0..rows)
        .map(|r| results.iter().fold(init, |acc, column| op(acc, column[r])))
        .collect()
}

impl fmt::Debug for Linker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Linker::Identity => f.write_str("Identity"),
            Linker::Sum => f.write_str("Sum"),
            Linker::And => f.write_str("And"),
            Linker::Or => f.write_str("Or"),
            Linker::Custom(_) => f.write_str("Custom"),
        }
    }
}
