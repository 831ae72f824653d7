//! Error and advisory types for the analysis pipeline.

use serde::{Deserialize, Serialize};

/// Error raised during validation, statistical computation, or rendering.
///
/// Validation failures abort before any statistical computation; computation
/// failures abort before any plotting. None of these conditions are logged
/// and swallowed; they always surface to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// A response value is missing (NaN or infinite).
    ///
    /// Raised during dataset construction, before any statistic is computed.
    /// Blocks containing missing responses must be removed by the caller;
    /// no imputation or partial exclusion happens here.
    MissingData {
        /// Zero-based index of the offending row in the input order.
        index: usize,
    },

    /// A block does not contribute exactly one response per treatment level.
    ///
    /// The rank and contrast reshaping steps are only well-defined for
    /// balanced designs, so unbalanced input is rejected up front instead of
    /// silently corrupting the pairwise differences.
    UnbalancedDesign {
        /// Label of the first offending block.
        block: String,
    },

    /// The contrast machinery cannot run on this design
    /// (fewer than two treatment levels, or a degenerate layout).
    ContrastComputation(String),

    /// A plot failed to render.
    ///
    /// Propagated to the caller unmodified; there is no partial-plot
    /// recovery and the statistical results are unaffected.
    Plot(String),
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingData { index } => write!(
                f,
                "missing response value at row {index} - remove the affected block before analysis"
            ),
            Self::UnbalancedDesign { block } => write!(
                f,
                "block {block:?} does not have exactly one response per treatment level"
            ),
            Self::ContrastComputation(msg) => {
                write!(f, "pairwise contrast computation failed: {msg}")
            }
            Self::Plot(msg) => write!(f, "plot rendering failed: {msg}"),
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Non-fatal advisory recorded while normalizing a dataset.
///
/// Warnings never stop the analysis; they are carried on the [`Dataset`]
/// and surfaced by the terminal reporter.
///
/// [`Dataset`]: crate::data::Dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationWarning {
    /// Exactly two treatment levels were observed.
    ///
    /// The omnibus rank test still runs, but with two levels a paired
    /// two-sample test (sign test or Wilcoxon signed-rank) is the more
    /// powerful choice.
    TwoTreatmentLevels,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TwoTreatmentLevels => write!(
                f,
                "only two treatment levels observed - consider a paired two-sample test instead"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_row() {
        let err = AnalysisError::MissingData { index: 7 };
        assert!(err.to_string().contains("row 7"));
    }

    #[test]
    fn display_names_the_block() {
        let err = AnalysisError::UnbalancedDesign {
            block: "subject-3".to_string(),
        };
        assert!(err.to_string().contains("subject-3"));
    }

    #[test]
    fn warning_is_advisory_text() {
        let text = ValidationWarning::TwoTreatmentLevels.to_string();
        assert!(text.contains("two treatment levels"));
    }

    #[test]
    fn warning_serializes_with_its_name() {
        let json = serde_json::to_string(&ValidationWarning::TwoTreatmentLevels).unwrap();
        assert!(json.contains("TwoTreatmentLevels"));
        let back: ValidationWarning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ValidationWarning::TwoTreatmentLevels);
    }
}
