use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::gene::Dataset;

/// The problem being solved: turns chromosome outputs into objective values.
///
/// Every objective is minimized. `score` receives the linked chromosome output
/// (one column per linker output, one value per dataset row) together with the
/// dataset, and must return exactly `num_objectives()` values.
///
/// A `score` that fails or yields a NaN or `-inf` objective does not stop the
/// run: the chromosome gets `+inf` for every objective instead. Domain errors
/// such as `ln(0)` surface this way.
///
/// # Examples
///
/// ```
/// use mogep::error::Result;
/// use mogep::evolution::Challenge;
/// use mogep::gene::{ColumnarDataset, Dataset};
///
/// /// Squared error against the `target` column, and output magnitude.
/// struct Fit;
///
/// impl Challenge<ColumnarDataset> for Fit {
///     fn num_objectives(&self) -> usize {
///         2
///     }
///
///     fn score(&self, outputs: &[Vec<f64>], data: &ColumnarDataset) -> Result<Vec<f64>> {
///         let target = data.column("target").unwrap_or(&[]);
///         let error = outputs[0].iter().zip(target).map(|(o, t)| (o - t).powi(2)).sum();
///         let size = outputs[0].iter().map(|o| o.abs()).sum();
///         Ok(vec![error, size])
///     }
/// }
/// ```
pub trait Challenge<D: Dataset + ?Sized>: Send + Sync {
    /// Number of objectives `score` returns.
    fn num_objectives(&self) -> usize;

    /// Computes the objective vector for one chromosome's outputs.
    fn score(&self, outputs: &[Vec<f64>], data: &D) -> Result<Vec<f64>>;

    /// Returns `true` once `chromosome` is good enough to stop the run.
    ///
    /// Evolution stops early when every member of the best front is solved.
    fn solved(&self, _chromosome: &Chromosome) -> bool {
        false
    }
}
