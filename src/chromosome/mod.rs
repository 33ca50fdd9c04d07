//! # Chromosome
//!
//! A chromosome is an ordered, fixed-size set of genes sharing one head length,
//! plus the linker that merges their results. It is immutable: the genetic
//! operators build new chromosomes through [`Chromosome::new_instance`], which
//! hands back the very same `Arc` when nothing changed so that no-op edits keep
//! their id and their cached fitness.
//!
//! Fitness is computed lazily by a [`Challenge`] and cached for the lifetime of
//! the chromosome.

pub mod linker;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::trace;

use crate::error::{GeneticError, Result};
use crate::evolution::Challenge;
use crate::gene::{Dataset, Gene, GeneKind, SymbolTable};
use crate::pareto::{self, Objectives};
use crate::rng::RandomNumberGenerator;

pub use linker::Linker;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// An immutable multi-gene GEP individual.
pub struct Chromosome {
    id: u64,
    genes: Vec<Arc<Gene>>,
    head_length: usize,
    linker: Linker,
    fitnesses: OnceLock<Vec<f64>>,
}

impl Chromosome {
    /// Creates a chromosome from its genes.
    ///
    /// # Errors
    ///
    /// Returns an `IllegalGene` error if `genes` is empty, if the head length is
    /// zero, or if a gene has a different head length.
    pub fn new(genes: Vec<Arc<Gene>>, head_length: usize, linker: Linker) -> Result<Self> {
        if genes.is_empty() {
            return Err(GeneticError::IllegalGene(
                "A chromosome needs at least one gene".to_string(),
            ));
        }
        if head_length == 0 {
            return Err(GeneticError::IllegalGene(
                "Head length must be positive".to_string(),
            ));
        }
        if let Some(gene) = genes.iter().find(|g| g.head_length() != head_length) {
            return Err(GeneticError::IllegalGene(format!(
                "Gene head length {} differs from chromosome head length {}",
                gene.head_length(),
                head_length
            )));
        }

        Ok(Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            genes,
            head_length,
            linker,
            fitnesses: OnceLock::new(),
        })
    }

    /// Creates a chromosome of `num_genes` random genes.
    pub fn random(
        symbols: &Arc<SymbolTable>,
        head_length: usize,
        num_genes: usize,
        kind: GeneKind,
        linker: Linker,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        let genes = (0..num_genes)
            .map(|_| Gene::random(Arc::clone(symbols), head_length, kind, rng).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;
        Self::new(genes, head_length, linker)
    }

    /// Returns `self` if `genes` equals the current genes, otherwise a new
    /// chromosome with the same head length and linker.
    pub fn new_instance(self: &Arc<Self>, genes: Vec<Arc<Gene>>) -> Result<Arc<Chromosome>> {
        if genes == self.genes {
            return Ok(Arc::clone(self));
        }
        Chromosome::new(genes, self.head_length, self.linker.clone()).map(Arc::new)
    }

    /// Process-wide unique id, increasing in construction order.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn genes(&self) -> &[Arc<Gene>] {
        &self.genes
    }

    pub fn head_length(&self) -> usize {
        self.head_length
    }

    pub fn linker(&self) -> &Linker {
        &self.linker
    }

    /// The symbol table shared by the genes.
    pub fn symbols(&self) -> &Arc<SymbolTable> {
        self.genes[0].symbols()
    }

    /// Total number of alleles over all genes.
    pub fn len(&self) -> usize {
        self.genes.iter().map(|g| g.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total coding length over all genes.
    pub fn coding_length(&self) -> usize {
        self.genes.iter().map(|g| g.coding_length()).sum()
    }

    /// Evaluates every gene and links the results.
    pub fn eval<D: Dataset + ?Sized>(&self, data: &D) -> Result<Vec<Vec<f64>>> {
        let results = self
            .genes
            .iter()
            .map(|g| g.eval(data))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.linker.link(results))
    }

    /// The cached objective vector, if it has been computed.
    pub fn fitnesses(&self) -> Option<&[f64]> {
        self.fitnesses.get().map(Vec::as_slice)
    }

    /// Returns the cached objective vector, computing it on first use.
    ///
    /// A failing score, or one with a NaN or `-inf` objective, is replaced with
    /// `+inf` for every objective so that broken expressions rank last instead
    /// of aborting the run.
    ///
    /// # Errors
    ///
    /// Returns an `Evaluation` error if a terminal cannot be resolved, and a
    /// `FitnessCalculation` error if the score has the wrong number of objectives.
    pub fn evaluate_fitness<D, C>(&self, challenge: &C, data: &D) -> Result<&[f64]>
    where
        D: Dataset + ?Sized,
        C: Challenge<D> + ?Sized,
    {
        if let Some(fitnesses) = self.fitnesses.get() {
            return Ok(fitnesses);
        }

        let expected = challenge.num_objectives();
        let outputs = self.eval(data)?;
        let fitnesses = match challenge.score(&outputs, data) {
            Ok(values) if values.len() != expected => {
                return Err(GeneticError::FitnessCalculation(format!(
                    "Challenge returned {} objectives, expected {}",
                    values.len(),
                    expected
                )));
            }
            Ok(values) if values.iter().any(|v| v.is_nan() || *v == f64::NEG_INFINITY) => {
                trace!(chromosome = self.id, objectives = ?values, "non-finite objective penalised");
                vec![f64::INFINITY; expected]
            }
            Ok(values) => values,
            Err(e) => {
                trace!(chromosome = self.id, error = %e, "failed score penalised");
                vec![f64::INFINITY; expected]
            }
        };

        Ok(self.fitnesses.get_or_init(|| fitnesses))
    }

    /// Returns `true` if this chromosome Pareto-dominates `other` (minimization).
    ///
    /// Unevaluated chromosomes dominate nothing and are dominated by nothing.
    pub fn dominates(&self, other: &Chromosome) -> bool {
        match (self.fitnesses(), other.fitnesses()) {
            (Some(a), Some(b)) => pareto::dominates(a, b),
            _ => false,
        }
    }

    /// Returns `true` if every objective is exactly zero.
    pub fn is_degenerate(&self) -> bool {
        self.fitnesses()
            .is_some_and(|f| f.iter().all(|v| *v == 0.0))
    }

    /// Bracketed coding regions of every gene.
    pub fn coding_repr(&self) -> Vec<String> {
        self.genes.iter().map(|g| g.coding_repr()).collect()
    }
}

impl Objectives for Chromosome {
    fn objectives(&self) -> &[f64] {
        self.fitnesses().unwrap_or(&[])
    }
}

impl Objectives for Arc<Chromosome> {
    fn objectives(&self) -> &[f64] {
        self.as_ref().objectives()
    }
}

impl fmt::Debug for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chromosome")
            .field("id", &self.id)
            .field("genes", &self.genes)
            .field("linker", &self.linker)
            .field("fitnesses", &self.fitnesses())
            .finish()
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:", self.id)?;
        for gene in &self.genes {
            write!(f, " {}", gene)?;
        }
        Ok(())
    }
}
