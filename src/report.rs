//! Result types returned by the analysis pipeline.

use serde::{Deserialize, Serialize};

/// Result of the omnibus max-type rank test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmnibusTest {
    /// Maximum standardized absolute rank-mean difference over all pairs.
    pub statistic: f64,
    /// Two-sided p-value from the asymptotic joint reference distribution.
    pub p_value: f64,
    /// Number of treatment levels observed.
    pub k: usize,
    /// Number of blocks.
    pub n_blocks: usize,
    /// Signed standardized rank-mean difference per pair, in canonical pair
    /// order. Kept so the post-hoc step can reuse the omnibus transformation
    /// without recomputation.
    pub pair_stats: Vec<f64>,
}

/// One pairwise comparison, oriented as `level_b - level_a` with `level_a`
/// appearing earlier in observed level order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairComparison {
    /// Display label, `"level_b - level_a"`.
    pub label: String,
    /// Earlier level of the pair.
    pub level_a: String,
    /// Later level of the pair.
    pub level_b: String,
    /// Single-step (max-T) adjusted p-value.
    pub adjusted_p: f64,
}

/// Single-step adjusted pairwise comparisons in canonical pair order.
///
/// The vector length is always `k * (k - 1) / 2` and the ordering matches
/// the ordering used for difference labels and boxplot coloring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostHoc {
    /// One entry per unordered level pair.
    pub comparisons: Vec<PairComparison>,
}

impl PostHoc {
    /// Significance flags at the given level, aligned with `comparisons`.
    pub fn significant_at(&self, alpha: f64) -> Vec<bool> {
        self.comparisons
            .iter()
            .map(|c| c.adjusted_p < alpha)
            .collect()
    }
}

/// Tagged outcome of a full analysis.
///
/// Callers pattern-match instead of branching on a value whose shape depends
/// on significance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// The omnibus p-value fell below the significance threshold; pairwise
    /// post-hoc comparisons were computed.
    Significant {
        /// The omnibus test result.
        omnibus: OmnibusTest,
        /// Adjusted pairwise comparisons.
        post_hoc: PostHoc,
    },
    /// The omnibus p-value did not reach the threshold (or post-hoc analysis
    /// was disabled); only the omnibus result is available.
    NotSignificant {
        /// The omnibus test result.
        omnibus: OmnibusTest,
    },
}

impl Outcome {
    /// The omnibus test result, present on both paths.
    pub fn omnibus(&self) -> &OmnibusTest {
        match self {
            Self::Significant { omnibus, .. } | Self::NotSignificant { omnibus } => omnibus,
        }
    }

    /// The post-hoc comparisons, if the significant path was taken.
    pub fn post_hoc(&self) -> Option<&PostHoc> {
        match self {
            Self::Significant { post_hoc, .. } => Some(post_hoc),
            Self::NotSignificant { .. } => None,
        }
    }

    /// Whether the significant path was taken.
    pub fn is_significant(&self) -> bool {
        matches!(self, Self::Significant { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn omnibus() -> OmnibusTest {
        OmnibusTest {
            statistic: 2.5,
            p_value: 0.02,
            k: 3,
            n_blocks: 8,
            pair_stats: vec![2.5, 1.0, -1.5],
        }
    }

    #[test]
    fn outcome_accessors() {
        let not_sig = Outcome::NotSignificant { omnibus: omnibus() };
        assert!(!not_sig.is_significant());
        assert!(not_sig.post_hoc().is_none());
        assert_eq!(not_sig.omnibus().k, 3);
    }

    #[test]
    fn significance_flags_align_with_comparisons() {
        let post_hoc = PostHoc {
            comparisons: vec![
                PairComparison {
                    label: "B - A".into(),
                    level_a: "A".into(),
                    level_b: "B".into(),
                    adjusted_p: 0.01,
                },
                PairComparison {
                    label: "C - A".into(),
                    level_a: "A".into(),
                    level_b: "C".into(),
                    adjusted_p: 0.20,
                },
            ],
        };
        assert_eq!(post_hoc.significant_at(0.05), [true, false]);
    }

    #[test]
    fn outcome_serializes_with_its_tag() {
        let outcome = Outcome::NotSignificant { omnibus: omnibus() };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("NotSignificant"));
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
