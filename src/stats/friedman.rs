//! Omnibus max-type rank test and single-step pairwise adjustment.
//!
//! The omnibus statistic is the maximum over all Tukey pairwise contrasts of
//! the standardized absolute rank-mean difference
//!
//! ```text
//! q_ij = |Rbar_j - Rbar_i| / sqrt(k * (k + 1) / (6 * n))
//! ```
//!
//! computed on within-block average ranks, referenced to the studentized
//! range with infinite degrees of freedom at `q * sqrt(2)`. An all-tied
//! dataset has statistic 0 and p-value 1. The test keeps every per-pair
//! statistic, so the post-hoc step reuses the same transformation machinery
//! without recomputation, and the minimum adjusted p-value equals the
//! omnibus p-value by construction.

use std::f64::consts::SQRT_2;

use crate::data::Dataset;
use crate::error::AnalysisError;
use crate::report::{OmnibusTest, PairComparison, PostHoc};

use super::{contrast, rank, tukey};

/// Run the omnibus rank test on a normalized dataset.
///
/// # Errors
///
/// [`AnalysisError::ContrastComputation`] when the design is degenerate
/// (fewer than two treatment levels, or no blocks).
pub fn omnibus_test(dataset: &Dataset) -> Result<OmnibusTest, AnalysisError> {
    let k = dataset.k();
    let n = dataset.n_blocks();
    let pairs = dataset.pairs();
    let contrasts = contrast::tukey_contrasts(k, &pairs)?;
    if n == 0 {
        return Err(AnalysisError::ContrastComputation(
            "dataset contains no blocks".to_string(),
        ));
    }

    // Numeric transformation: within-block average ranks.
    let ranks = rank::rank_matrix(dataset);

    // Mean rank per treatment level across blocks.
    let mut mean_ranks = vec![0.0; k];
    for row in &ranks {
        for (level, r) in row.iter().enumerate() {
            mean_ranks[level] += r;
        }
    }
    for m in &mut mean_ranks {
        *m /= n as f64;
    }

    // Categorical transformation: one signed contrast value per pair.
    let diffs = contrast::apply(&contrasts, &mean_ranks);

    // Under the null, Var(Rbar_j - Rbar_i) = k(k+1) / (6n).
    let std_error = (k as f64 * (k as f64 + 1.0) / (6.0 * n as f64)).sqrt();
    let pair_stats: Vec<f64> = diffs.iter().map(|d| d / std_error).collect();

    let statistic = pair_stats.iter().fold(0.0_f64, |max, z| max.max(z.abs()));
    let p_value = tukey::studentized_range_sf(statistic * SQRT_2, k);

    Ok(OmnibusTest {
        statistic,
        p_value,
        k,
        n_blocks: n,
        pair_stats,
    })
}

/// Single-step (max-T) adjusted p-values for all pairwise contrasts.
///
/// Each pair's standardized statistic is referenced to the same joint null
/// as the omnibus maximum, which controls the family-wise error rate across
/// all pairs simultaneously. The output is ordered by the canonical pair
/// enumeration of [`Dataset::pairs`].
///
/// # Errors
///
/// [`AnalysisError::ContrastComputation`] if the omnibus result does not
/// match the dataset's pair enumeration.
pub fn adjusted_p_values(
    dataset: &Dataset,
    omnibus: &OmnibusTest,
) -> Result<PostHoc, AnalysisError> {
    let pairs = dataset.pairs();
    if pairs.len() != omnibus.pair_stats.len() || dataset.k() != omnibus.k {
        return Err(AnalysisError::ContrastComputation(format!(
            "omnibus result covers {} contrasts but the dataset has {}",
            omnibus.pair_stats.len(),
            pairs.len()
        )));
    }

    let comparisons = pairs
        .iter()
        .zip(&omnibus.pair_stats)
        .map(|(&pair, &z)| PairComparison {
            label: dataset.pair_label(pair),
            level_a: dataset.levels()[pair.first].clone(),
            level_b: dataset.levels()[pair.second].clone(),
            adjusted_p: tukey::studentized_range_sf(z.abs() * SQRT_2, omnibus.k),
        })
        .collect();

    Ok(PostHoc { comparisons })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    fn strong_effect_dataset() -> Dataset {
        // Four levels with a large, consistent ordering across six blocks.
        let mut rows = Vec::new();
        for b in 0..6 {
            let block = format!("b{b}");
            let noise = b as f64 * 0.1;
            rows.push((0.0 + noise, "w".to_string(), block.clone()));
            rows.push((10.0 + noise, "x".to_string(), block.clone()));
            rows.push((20.0 + noise, "y".to_string(), block.clone()));
            rows.push((30.0 + noise, "z".to_string(), block));
        }
        Dataset::from_rows(rows).unwrap()
    }

    #[test]
    fn worked_two_level_example() {
        // A = (1, 2, 1), B = (5, 6, 7): B ranks above A in every block.
        let d = Dataset::from_rows([
            (1.0, "A", "b1"),
            (5.0, "B", "b1"),
            (2.0, "A", "b2"),
            (6.0, "B", "b2"),
            (1.0, "A", "b3"),
            (7.0, "B", "b3"),
        ])
        .unwrap();
        let test = omnibus_test(&d).unwrap();
        // Rank means 1 and 2; q = 1 / sqrt(2*3/18) = sqrt(3).
        assert!((test.statistic - 3.0_f64.sqrt()).abs() < 1e-12);
        // Matches the chi-squared Friedman p-value for k = 2: 0.0833.
        assert!((test.p_value - 0.0833).abs() < 1e-3, "p = {}", test.p_value);
        assert_eq!(test.pair_stats.len(), 1);
        assert!(test.pair_stats[0] > 0.0, "B - A difference must be positive");
    }

    #[test]
    fn all_tied_data_is_a_null_result() {
        let d = Dataset::from_rows([
            (4.0, "A", "b1"),
            (4.0, "B", "b1"),
            (4.0, "C", "b1"),
            (4.0, "A", "b2"),
            (4.0, "B", "b2"),
            (4.0, "C", "b2"),
        ])
        .unwrap();
        let test = omnibus_test(&d).unwrap();
        assert_eq!(test.statistic, 0.0);
        assert_eq!(test.p_value, 1.0);
    }

    #[test]
    fn strong_effect_is_significant() {
        let test = omnibus_test(&strong_effect_dataset()).unwrap();
        assert!(test.p_value < 0.01, "p = {}", test.p_value);
    }

    #[test]
    fn posthoc_vector_length_is_k_choose_2() {
        let d = strong_effect_dataset();
        let test = omnibus_test(&d).unwrap();
        let post_hoc = adjusted_p_values(&d, &test).unwrap();
        assert_eq!(post_hoc.comparisons.len(), 6);
    }

    #[test]
    fn minimum_adjusted_p_equals_omnibus_p() {
        let d = strong_effect_dataset();
        let test = omnibus_test(&d).unwrap();
        let post_hoc = adjusted_p_values(&d, &test).unwrap();
        let min_p = post_hoc
            .comparisons
            .iter()
            .map(|c| c.adjusted_p)
            .fold(f64::INFINITY, f64::min);
        assert!((min_p - test.p_value).abs() < 1e-12);
    }

    #[test]
    fn adjacent_levels_are_harder_to_separate() {
        let d = strong_effect_dataset();
        let test = omnibus_test(&d).unwrap();
        let post_hoc = adjusted_p_values(&d, &test).unwrap();
        // "x - w" (one rank apart) vs "z - w" (three ranks apart).
        assert!(post_hoc.comparisons[0].adjusted_p > post_hoc.comparisons[2].adjusted_p);
    }

    #[test]
    fn mismatched_omnibus_state_is_rejected() {
        let d = strong_effect_dataset();
        let other = Dataset::from_rows([
            (1.0, "A", "b1"),
            (2.0, "B", "b1"),
        ])
        .unwrap();
        let test = omnibus_test(&other).unwrap();
        assert!(adjusted_p_values(&d, &test).is_err());
    }

    #[test]
    fn single_level_design_fails_contrast_computation() {
        let d = Dataset::from_rows([(1.0, "A", "b1"), (2.0, "A", "b2")]).unwrap();
        assert!(matches!(
            omnibus_test(&d),
            Err(AnalysisError::ContrastComputation(_))
        ));
    }
}
