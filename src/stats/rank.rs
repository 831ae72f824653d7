//! Within-block rank transformation with average ranks for ties.

use crate::data::Dataset;

/// Replace values by their ranks (1-based), tied values receiving the mean
/// of the rank positions they span.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        // Scan the tie run starting at sorted position i.
        let mut j = i + 1;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }
        // Sorted positions i..j carry 1-based ranks i+1..=j; ties share the mean.
        let mean_rank = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = mean_rank;
        }
        i = j;
    }
    ranks
}

/// Rank matrix of a dataset: one row per block holding the within-block
/// ranks of the responses across treatment levels, in observed level order.
pub fn rank_matrix(dataset: &Dataset) -> Vec<Vec<f64>> {
    (0..dataset.n_blocks())
        .map(|b| average_ranks(dataset.block_responses(b)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_values_get_distinct_ranks() {
        assert_eq!(average_ranks(&[3.0, 1.0, 2.0]), [3.0, 1.0, 2.0]);
    }

    #[test]
    fn ties_share_the_average_rank() {
        // 5.0 occupies rank positions 2 and 3 -> both get 2.5.
        assert_eq!(average_ranks(&[5.0, 1.0, 5.0, 9.0]), [2.5, 1.0, 2.5, 4.0]);
    }

    #[test]
    fn all_tied_values_share_the_midrank() {
        assert_eq!(average_ranks(&[4.0, 4.0, 4.0]), [2.0, 2.0, 2.0]);
    }

    #[test]
    fn empty_slice_ranks_to_empty() {
        assert!(average_ranks(&[]).is_empty());
    }

    #[test]
    fn rank_matrix_ranks_within_each_block() {
        let d = Dataset::from_rows([
            (10.0, "A", "b1"),
            (30.0, "B", "b1"),
            (20.0, "C", "b1"),
            (3.0, "A", "b2"),
            (1.0, "B", "b2"),
            (2.0, "C", "b2"),
        ])
        .unwrap();
        let m = rank_matrix(&d);
        assert_eq!(m[0], [1.0, 3.0, 2.0]);
        assert_eq!(m[1], [3.0, 1.0, 2.0]);
    }
}
