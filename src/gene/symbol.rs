//! # Symbol Table
//!
//! The `SymbolTable` holds every symbol a gene may contain: function symbols with
//! a display tag, a fixed arity and an implementation, terminal names resolved
//! against the dataset, and an optional random-constant placeholder.
//!
//! A table is built once per problem and shared by every gene through an `Arc`.
//!
//! ## Example
//!
//! ```rust
//! use mogep::functions;
//! use mogep::gene::SymbolTable;
//!
//! let table = SymbolTable::builder()
//!     .functions(functions::arithmetic())
//!     .terminal("x")
//!     .constants(-1.0, 1.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(table.max_arity(), 2);
//! assert_eq!(table.tail_length(4), 5);
//! assert_eq!(table.gene_length(4), 9);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// The display tag used for the random-constant placeholder.
pub const CONSTANT_TAG: &str = "?";

/// One symbol at one gene position.
///
/// Function and terminal alleles are indices into the owning [`SymbolTable`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allele {
    /// The function at this index of the table.
    Function(usize),
    /// The terminal at this index of the table.
    Terminal(usize),
    /// The random-constant placeholder.
    Constant,
}

impl Allele {
    /// Returns `true` if the allele is a function symbol.
    pub fn is_function(&self) -> bool {
        matches!(self, Allele::Function(_))
    }
}

/// A function symbol: display tag, fixed arity and row-wise implementation.
///
/// The implementation receives one value per argument and is applied to every
/// dataset row during evaluation.
#[derive(Clone)]
pub struct Function {
    tag: String,
    arity: usize,
    op: Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>,
}

impl Function {
    /// Creates a new function symbol.
    pub fn new<F>(tag: impl Into<String>, arity: usize, op: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            tag: tag.into(),
            arity,
            op: Arc::new(op),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Applies the function to a single row of arguments.
    pub fn call(&self, args: &[f64]) -> f64 {
        (self.op)(args)
    }

    /// Applies the function row by row over argument columns of length `rows`.
    pub fn apply(&self, args: &[Vec<f64>], rows: usize) -> Vec<f64> {
        let mut row = vec![0.0; args.len()];
        (0..rows)
            .map(|r| {
                for (slot, column) in row.iter_mut().zip(args) {
                    *slot = column[r];
                }
                (self.op)(&row)
            })
            .collect()
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("tag", &self.tag)
            .field("arity", &self.arity)
            .finish()
    }
}

/// The immutable set of symbols available to the genes of one problem.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    functions: Vec<Function>,
    terminals: Vec<String>,
    constant_range: Option<(f64, f64)>,
    head_symbols: Vec<Allele>,
    tail_symbols: Vec<Allele>,
    max_arity: usize,
}

impl SymbolTable {
    /// Returns a builder for creating a `SymbolTable`.
    pub fn builder() -> SymbolTableBuilder {
        SymbolTableBuilder::default()
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }

    /// The sampling range of random constants, if the placeholder is enabled.
    pub fn constant_range(&self) -> Option<(f64, f64)> {
        self.constant_range
    }

    /// Every symbol allowed in a gene head: functions, terminals and the constant placeholder.
    pub fn head_symbols(&self) -> &[Allele] {
        &self.head_symbols
    }

    /// Every symbol allowed in a gene tail.
    pub fn tail_symbols(&self) -> &[Allele] {
        &self.tail_symbols
    }

    /// The largest arity among the function symbols, or 0 without functions.
    pub fn max_arity(&self) -> usize {
        self.max_arity
    }

    /// Returns the function behind an allele, if it is a known function symbol.
    pub fn function(&self, allele: Allele) -> Option<&Function> {
        match allele {
            Allele::Function(idx) => self.functions.get(idx),
            _ => None,
        }
    }

    /// Number of operands the allele consumes when decoded.
    pub fn arity(&self, allele: Allele) -> usize {
        self.function(allele).map_or(0, Function::arity)
    }

    /// Returns `true` if the allele refers to a symbol of this table.
    pub fn contains(&self, allele: Allele) -> bool {
        match allele {
            Allele::Function(idx) => idx < self.functions.len(),
            Allele::Terminal(idx) => idx < self.terminals.len(),
            Allele::Constant => self.constant_range.is_some(),
        }
    }

    /// Looks up the terminal allele with the given name.
    pub fn terminal(&self, name: &str) -> Option<Allele> {
        self.terminals
            .iter()
            .position(|t| t == name)
            .map(Allele::Terminal)
    }

    /// Looks up the first function allele with the given tag.
    pub fn function_by_tag(&self, tag: &str) -> Option<Allele> {
        self.functions
            .iter()
            .position(|f| f.tag == tag)
            .map(Allele::Function)
    }

    /// Tail length for a head of `head_length`: `h * (n - 1) + 1`.
    pub fn tail_length(&self, head_length: usize) -> usize {
        head_length * self.max_arity.saturating_sub(1) + 1
    }

    /// Total gene length for a head of `head_length`.
    pub fn gene_length(&self, head_length: usize) -> usize {
        head_length + self.tail_length(head_length)
    }

    /// Draws a symbol allowed in the head.
    pub fn random_head_allele(&self, rng: &mut RandomNumberGenerator) -> Allele {
        self.head_symbols[rng.gen_index(self.head_symbols.len())]
    }

    /// Draws a symbol allowed in the tail.
    pub fn random_tail_allele(&self, rng: &mut RandomNumberGenerator) -> Allele {
        self.tail_symbols[rng.gen_index(self.tail_symbols.len())]
    }

    /// Display name of an allele without its constant value.
    pub fn symbol_name(&self, allele: Allele) -> &str {
        match allele {
            Allele::Function(idx) => self.functions.get(idx).map_or("<?>", |f| f.tag()),
            Allele::Terminal(idx) => self.terminals.get(idx).map_or("<?>", String::as_str),
            Allele::Constant => CONSTANT_TAG,
        }
    }
}

/// Builder for `SymbolTable`.
#[derive(Debug, Clone, Default)]
pub struct SymbolTableBuilder {
    functions: Vec<Function>,
    terminals: Vec<String>,
    constant_range: Option<(f64, f64)>,
}

impl SymbolTableBuilder {
    /// Adds one function symbol.
    pub fn function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    /// Adds several function symbols.
    pub fn functions(mut self, functions: impl IntoIterator<Item = Function>) -> Self {
        self.functions.extend(functions);
        self
    }

    /// Adds one terminal, resolved by name against the dataset.
    pub fn terminal(mut self, name: impl Into<String>) -> Self {
        self.terminals.push(name.into());
        self
    }

    /// Adds several terminals.
    pub fn terminals<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.terminals.extend(names.into_iter().map(Into::into));
        self
    }

    /// Enables the random-constant placeholder, sampling constants from `[low, high)`.
    pub fn constants(mut self, low: f64, high: f64) -> Self {
        self.constant_range = Some((low, high));
        self
    }

    /// Builds the `SymbolTable`.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if there is no terminal symbol, if a
    /// terminal name is repeated, or if the constant range is not finite and ordered.
    pub fn build(self) -> Result<SymbolTable> {
        if self.terminals.is_empty() && self.constant_range.is_none() {
            return Err(GeneticError::Configuration(
                "Symbol table needs at least one terminal".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.terminals.iter().find(|t| !seen.insert(t.as_str())) {
            return Err(GeneticError::Configuration(format!(
                "Terminal `{}` is declared twice",
                dup
            )));
        }

        if let Some((low, high)) = self.constant_range {
            if !(low.is_finite() && high.is_finite() && low <= high) {
                return Err(GeneticError::Configuration(format!(
                    "Invalid constant range [{}, {})",
                    low, high
                )));
            }
        }

        let mut tail_symbols: Vec<Allele> =
            (0..self.terminals.len()).map(Allele::Terminal).collect();
        if self.constant_range.is_some() {
            tail_symbols.push(Allele::Constant);
        }
        let mut head_symbols: Vec<Allele> =
            (0..self.functions.len()).map(Allele::Function).collect();
        head_symbols.extend(tail_symbols.iter().copied());

        let max_arity = self.functions.iter().map(Function::arity).max().unwrap_or(0);

        Ok(SymbolTable {
            functions: self.functions,
            terminals: self.terminals,
            constant_range: self.constant_range,
            head_symbols,
            tail_symbols,
            max_arity,
        })
    }
}
