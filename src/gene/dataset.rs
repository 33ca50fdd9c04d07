//! # Dataset
//!
//! Terminal symbols are resolved by name against a columnar batch. The [`Dataset`]
//! trait is the only thing genes need; [`ColumnarDataset`] is a simple in-memory
//! implementation.

use std::collections::HashMap;

use crate::error::{GeneticError, Result};

/// A tabular batch whose columns are addressable by terminal name.
pub trait Dataset: Send + Sync {
    /// Returns the column called `name`, if present.
    fn column(&self, name: &str) -> Option<&[f64]>;

    /// Number of rows in every column.
    fn len(&self) -> usize;

    /// Returns `true` if the dataset has no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Named `f64` columns of equal length.
///
/// ## Example
///
/// ```rust
/// use mogep::gene::{ColumnarDataset, Dataset};
///
/// let data = ColumnarDataset::new()
///     .with_column("x", vec![1.0, 2.0, 3.0])
///     .unwrap();
///
/// assert_eq!(data.len(), 3);
/// assert_eq!(data.column("x"), Some(&[1.0, 2.0, 3.0][..]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColumnarDataset {
    columns: HashMap<String, Vec<f64>>,
    rows: usize,
}

impl ColumnarDataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the column length differs from the
    /// columns already present.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if !self.columns.is_empty() && values.len() != self.rows {
            return Err(GeneticError::Configuration(format!(
                "Column `{}` has {} rows, expected {}",
                name,
                values.len(),
                self.rows
            )));
        }
        self.rows = values.len();
        self.columns.insert(name, values);
        Ok(self)
    }

    /// Builds a dataset from `(name, values)` pairs.
    pub fn from_columns<S: Into<String>>(
        columns: impl IntoIterator<Item = (S, Vec<f64>)>,
    ) -> Result<Self> {
        columns
            .into_iter()
            .try_fold(Self::new(), |data, (name, values)| data.with_column(name, values))
    }

    /// Names of the columns, in no particular order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

impl Dataset for ColumnarDataset {
    fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    fn len(&self) -> usize {
        self.rows
    }
}
