//! # Gene
//!
//! A gene is a fixed-length sequence of alleles split into a head, which may hold
//! any symbol, and a tail, which holds terminals only. The tail is long enough
//! that decoding never runs out of operands, so every gene decodes into a valid
//! expression tree regardless of its content.
//!
//! Decoding reads the alleles breadth-first (Karva notation) or depth-first
//! (prefix notation) and stops as soon as every open argument slot is filled.
//! The number of alleles consumed is the gene's *coding length*; alleles after
//! it are carried along but never evaluated.
//!
//! Genes are immutable. [`Gene::derive`] applies a batch of edits and returns a
//! new gene, or the very same `Arc` when the edits change nothing.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mogep::functions;
//! use mogep::gene::{Allele, ColumnarDataset, Gene, GeneKind, SymbolTable};
//!
//! let table = Arc::new(
//!     SymbolTable::builder()
//!         .functions(functions::arithmetic())
//!         .terminals(["x", "y"])
//!         .build()
//!         .unwrap(),
//! );
//! let add = table.function_by_tag("+").unwrap();
//! let mul = table.function_by_tag("*").unwrap();
//! let x = table.terminal("x").unwrap();
//! let y = table.terminal("y").unwrap();
//!
//! // (x * y) + x, head length 3
//! let gene = Gene::new(table, vec![add, mul, x, x, y, x, y], 3, GeneKind::Karva).unwrap();
//! assert_eq!(gene.coding_length(), 5);
//!
//! let data = ColumnarDataset::from_columns([("x", vec![2.0]), ("y", vec![5.0])]).unwrap();
//! assert_eq!(gene.eval(&data).unwrap(), vec![12.0]);
//! ```

pub mod dataset;
pub mod symbol;

use std::fmt;
use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

pub use dataset::{ColumnarDataset, Dataset};
pub use symbol::{Allele, Function, SymbolTable, SymbolTableBuilder, CONSTANT_TAG};

/// An edit applied by [`Gene::derive`]: replacement alleles written from a start index.
pub type Edit = (usize, Vec<Allele>);

/// Order in which a gene's alleles are read into a tree.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneKind {
    /// Breadth-first (Karva) order.
    #[default]
    Karva,
    /// Depth-first (prefix) order.
    Prefix,
}

/// An immutable GEP gene.
#[derive(Clone)]
pub struct Gene {
    symbols: Arc<SymbolTable>,
    alleles: Vec<Allele>,
    head_length: usize,
    coding_length: usize,
    kind: GeneKind,
    constants: Arc<[f64]>,
}

impl Gene {
    /// Creates a gene without random constants.
    ///
    /// # Errors
    ///
    /// See [`Gene::with_constants`].
    pub fn new(
        symbols: Arc<SymbolTable>,
        alleles: Vec<Allele>,
        head_length: usize,
        kind: GeneKind,
    ) -> Result<Self> {
        let constants = vec![0.0; alleles.len()];
        Self::with_constants(symbols, alleles, head_length, kind, constants.into())
    }

    /// Creates a gene whose constant placeholder at position `i` evaluates to `constants[i]`.
    ///
    /// # Errors
    ///
    /// Returns an `IllegalGene` error if the head length is zero, if the gene
    /// length is not `symbols.gene_length(head_length)`, if an allele is unknown
    /// to the table, if a function sits in the tail, or if `constants` does not
    /// have one value per allele.
    pub fn with_constants(
        symbols: Arc<SymbolTable>,
        alleles: Vec<Allele>,
        head_length: usize,
        kind: GeneKind,
        constants: Arc<[f64]>,
    ) -> Result<Self> {
        if head_length == 0 {
            return Err(GeneticError::IllegalGene(
                "Head length must be positive".to_string(),
            ));
        }

        let expected = symbols.gene_length(head_length);
        if alleles.len() != expected {
            return Err(GeneticError::IllegalGene(format!(
                "Gene has {} alleles, expected {} for head length {}",
                alleles.len(),
                expected,
                head_length
            )));
        }

        if constants.len() != alleles.len() {
            return Err(GeneticError::IllegalGene(format!(
                "Gene has {} alleles but {} constants",
                alleles.len(),
                constants.len()
            )));
        }

        if let Some(idx) = alleles.iter().position(|a| !symbols.contains(*a)) {
            return Err(GeneticError::IllegalGene(format!(
                "Unknown symbol {:?} at position {}",
                alleles[idx], idx
            )));
        }

        check_tail(&alleles, head_length)?;

        let coding_length = coding_length(&symbols, &alleles, head_length);

        Ok(Self {
            symbols,
            alleles,
            head_length,
            coding_length,
            kind,
            constants,
        })
    }

    /// Creates a random gene: head symbols from the full set, tail symbols from the terminals.
    pub fn random(
        symbols: Arc<SymbolTable>,
        head_length: usize,
        kind: GeneKind,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        let length = symbols.gene_length(head_length);
        let alleles: Vec<Allele> = (0..length)
            .map(|idx| {
                if idx < head_length {
                    symbols.random_head_allele(rng)
                } else {
                    symbols.random_tail_allele(rng)
                }
            })
            .collect();

        let constants = match symbols.constant_range() {
            Some((low, high)) => rng.fetch_uniform(low, high, length),
            None => vec![0.0; length],
        };

        Self::with_constants(symbols, alleles, head_length, kind, constants.into())
    }

    pub fn symbols(&self) -> &Arc<SymbolTable> {
        &self.symbols
    }

    pub fn alleles(&self) -> &[Allele] {
        &self.alleles
    }

    pub fn head_length(&self) -> usize {
        self.head_length
    }

    pub fn tail_length(&self) -> usize {
        self.alleles.len() - self.head_length
    }

    /// Number of leading alleles consumed when decoding.
    pub fn coding_length(&self) -> usize {
        self.coding_length
    }

    pub fn kind(&self) -> GeneKind {
        self.kind
    }

    pub fn constants(&self) -> &[f64] {
        &self.constants
    }

    pub fn len(&self) -> usize {
        self.alleles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alleles.is_empty()
    }

    /// Applies `changes` and returns the resulting gene.
    ///
    /// Returns `self` when every edit matches the current content. The coding
    /// length is recomputed only when an edit starts at or before the current
    /// coding length; edits strictly after the coding region leave the decoded
    /// tree untouched.
    ///
    /// # Errors
    ///
    /// Returns an `IllegalGene` error if an edit runs past the end of the gene
    /// or writes a function into the tail.
    pub fn derive(self: &Arc<Self>, changes: &[Edit]) -> Result<Arc<Gene>> {
        let mut edited: Option<Vec<Allele>> = None;
        let mut touches_coding = false;

        for (start, replacement) in changes {
            let end = start + replacement.len();
            if end > self.alleles.len() {
                return Err(GeneticError::IllegalGene(format!(
                    "Edit [{}, {}) runs past the end of a gene of length {}",
                    start,
                    end,
                    self.alleles.len()
                )));
            }

            let current = edited.as_deref().unwrap_or(self.alleles.as_slice());
            if current[*start..end] == replacement[..] {
                continue;
            }

            edited.get_or_insert_with(|| self.alleles.clone())[*start..end]
                .copy_from_slice(replacement);
            if *start <= self.coding_length {
                touches_coding = true;
            }
        }

        let Some(alleles) = edited else {
            return Ok(Arc::clone(self));
        };

        if touches_coding {
            return Gene::with_constants(
                Arc::clone(&self.symbols),
                alleles,
                self.head_length,
                self.kind,
                Arc::clone(&self.constants),
            )
            .map(Arc::new);
        }

        check_tail(&alleles, self.head_length)?;
        if let Some(idx) = alleles.iter().position(|a| !self.symbols.contains(*a)) {
            return Err(GeneticError::IllegalGene(format!(
                "Unknown symbol {:?} at position {}",
                alleles[idx], idx
            )));
        }

        Ok(Arc::new(Gene {
            symbols: Arc::clone(&self.symbols),
            alleles,
            head_length: self.head_length,
            coding_length: self.coding_length,
            kind: self.kind,
            constants: Arc::clone(&self.constants),
        }))
    }

    /// Evaluates the decoded expression over every row of `data`.
    ///
    /// # Errors
    ///
    /// Returns an `Evaluation` error if a terminal has no matching column.
    pub fn eval<D: Dataset + ?Sized>(&self, data: &D) -> Result<Vec<f64>> {
        match self.kind {
            GeneKind::Karva => self.eval_karva(data),
            GeneKind::Prefix => self.eval_prefix(data),
        }
    }

    fn eval_karva<D: Dataset + ?Sized>(&self, data: &D) -> Result<Vec<f64>> {
        let rows = data.len();
        let mut slots: Vec<Vec<f64>> = vec![Vec::new(); self.coding_length];
        // Children of the function at `idx` are the last `arity` unconsumed slots.
        let mut unconsumed = self.coding_length;

        for idx in (0..self.coding_length).rev() {
            let allele = self.alleles[idx];
            slots[idx] = match self.symbols.function(allele) {
                Some(function) => {
                    let arity = function.arity();
                    if unconsumed < arity || unconsumed - arity <= idx {
                        return Err(GeneticError::Evaluation(format!(
                            "Gene ran out of operands at position {}",
                            idx
                        )));
                    }
                    let value = function.apply(&slots[unconsumed - arity..unconsumed], rows);
                    unconsumed -= arity;
                    value
                }
                None => self.resolve_terminal(idx, data)?,
            };
        }

        Ok(std::mem::take(&mut slots[0]))
    }

    fn eval_prefix<D: Dataset + ?Sized>(&self, data: &D) -> Result<Vec<f64>> {
        let rows = data.len();
        let mut stack: Vec<Vec<f64>> = Vec::with_capacity(self.coding_length);

        for idx in (0..self.coding_length).rev() {
            let allele = self.alleles[idx];
            match self.symbols.function(allele) {
                Some(function) => {
                    let arity = function.arity();
                    if stack.len() < arity {
                        return Err(GeneticError::Evaluation(format!(
                            "Gene ran out of operands at position {}",
                            idx
                        )));
                    }
                    // The top of the stack is the first argument.
                    let args: Vec<Vec<f64>> = stack.drain(stack.len() - arity..).rev().collect();
                    stack.push(function.apply(&args, rows));
                }
                None => stack.push(self.resolve_terminal(idx, data)?),
            }
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(value), true) => Ok(value),
            _ => Err(GeneticError::Evaluation(
                "Prefix gene did not reduce to a single value".to_string(),
            )),
        }
    }

    fn resolve_terminal<D: Dataset + ?Sized>(&self, idx: usize, data: &D) -> Result<Vec<f64>> {
        match self.alleles[idx] {
            Allele::Terminal(t) => {
                let name = &self.symbols.terminals()[t];
                data.column(name).map(<[f64]>::to_vec).ok_or_else(|| {
                    GeneticError::Evaluation(format!("Dataset has no column `{}`", name))
                })
            }
            Allele::Constant => Ok(vec![self.constants[idx]; data.len()]),
            Allele::Function(_) => Err(GeneticError::Evaluation(format!(
                "Function symbol at position {} treated as terminal",
                idx
            ))),
        }
    }

    /// The bracketed representation of the coding region only.
    pub fn coding_repr(&self) -> String {
        self.repr(self.coding_length)
    }

    fn repr(&self, upto: usize) -> String {
        self.alleles[..upto]
            .iter()
            .enumerate()
            .map(|(idx, allele)| match allele {
                Allele::Constant => format!("[{}]", self.constants[idx]),
                other => format!("[{}]", self.symbols.symbol_name(*other)),
            })
            .collect()
    }
}

impl PartialEq for Gene {
    fn eq(&self, other: &Self) -> bool {
        self.head_length == other.head_length
            && self.kind == other.kind
            && self.alleles == other.alleles
            && self.constants == other.constants
    }
}

impl fmt::Debug for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gene")
            .field("alleles", &self.to_string())
            .field("head_length", &self.head_length)
            .field("coding_length", &self.coding_length)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr(self.alleles.len()))
    }
}

/// Number of alleles consumed when decoding the gene.
///
/// Scans the head keeping the index of the last allele required so far; every
/// function extends it by its arity, and decoding ends when the scan reaches it.
pub fn coding_length(symbols: &SymbolTable, alleles: &[Allele], head_length: usize) -> usize {
    let mut last_required = 0;
    for (idx, allele) in alleles.iter().enumerate().take(head_length) {
        last_required += symbols.arity(*allele);
        if idx == last_required {
            break;
        }
    }
    last_required + 1
}

fn check_tail(alleles: &[Allele], head_length: usize) -> Result<()> {
    match alleles
        .iter()
        .enumerate()
        .skip(head_length)
        .find(|(_, a)| a.is_function())
    {
        Some((idx, _)) => Err(GeneticError::IllegalGene(format!(
            "Function symbol at tail position {} (head length {})",
            idx, head_length
        ))),
        None => Ok(()),
    }
}
