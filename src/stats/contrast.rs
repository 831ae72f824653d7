//! Tukey all-pairwise contrast matrix construction.

use nalgebra::{DMatrix, DVector};

use crate::data::TreatmentPair;
use crate::error::AnalysisError;

/// Build the Tukey all-pairs contrast matrix over `k` treatment levels.
///
/// One row per unordered pair `(i, j)` with `i < j` in observed level order:
/// `-1` in column `i`, `+1` in column `j`, zero elsewhere. Applied to the
/// mean-rank vector this yields the signed rank-mean difference
/// `level_j - level_i` for every pair.
///
/// # Errors
///
/// [`AnalysisError::ContrastComputation`] if fewer than two levels are
/// observed; no pairwise contrast exists for a degenerate design.
pub fn tukey_contrasts(
    k: usize,
    pairs: &[TreatmentPair],
) -> Result<DMatrix<f64>, AnalysisError> {
    if k < 2 {
        return Err(AnalysisError::ContrastComputation(format!(
            "need at least two treatment levels, observed {k}"
        )));
    }
    let mut contrasts = DMatrix::zeros(pairs.len(), k);
    for (row, pair) in pairs.iter().enumerate() {
        contrasts[(row, pair.first)] = -1.0;
        contrasts[(row, pair.second)] = 1.0;
    }
    Ok(contrasts)
}

/// Apply a contrast matrix to a mean-rank vector: one signed contrast value
/// per pair, in row (canonical pair) order.
pub fn apply(contrasts: &DMatrix<f64>, mean_ranks: &[f64]) -> DVector<f64> {
    contrasts * DVector::from_column_slice(mean_ranks)
}
