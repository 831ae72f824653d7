//! # blockrank
//!
//! Post-hoc analysis for Friedman rank-sum tests on blocked
//! (repeated-measures) designs.
//!
//! Given a long-format dataset of `(response, treatment, block)` rows, this
//! crate:
//!
//! - runs a distribution-free omnibus test on within-block ranks (a max-type
//!   statistic over Tukey all-pairwise contrasts, equivalent in spirit to
//!   Friedman's test),
//! - if significant, computes single-step (max-T) adjusted p-values for all
//!   `k * (k - 1) / 2` pairwise treatment comparisons against the same joint
//!   reference distribution, and
//! - renders two diagnostic plots: a parallel-coordinates plot of the raw
//!   values per block, and a boxplot of the pairwise within-block
//!   differences colored by significance.
//!
//! The statistical core is headless: [`analyze`] computes, [`run`] adds
//! terminal reporting and plotting on top.
//!
//! ## Quick start
//!
//! ```
//! use blockrank::{analyze, AnalysisError, Config, Dataset, Outcome};
//!
//! // Three blocks, each measured under treatments A and B.
//! let dataset = Dataset::from_rows([
//!     (1.0, "A", "b1"), (5.0, "B", "b1"),
//!     (2.0, "A", "b2"), (6.0, "B", "b2"),
//!     (1.0, "A", "b3"), (7.0, "B", "b3"),
//! ])?;
//!
//! match analyze(&dataset, &Config::default())? {
//!     Outcome::Significant { omnibus, post_hoc } => {
//!         println!("p = {:.4}", omnibus.p_value);
//!         for c in &post_hoc.comparisons {
//!             println!("{}: adjusted p = {:.4}", c.label, c.adjusted_p);
//!         }
//!     }
//!     Outcome::NotSignificant { omnibus } => {
//!         println!("not significant (p = {:.4})", omnibus.p_value);
//!     }
//! }
//! # Ok::<(), AnalysisError>(())
//! ```
//!
//! ## Requirements on the data
//!
//! The design must be balanced: every block contributes exactly one response
//! per observed treatment level. Missing responses (NaN) are rejected with
//! [`AnalysisError::MissingData`]; remove the affected blocks before
//! constructing the [`Dataset`]. Treatment and block domains are derived
//! strictly from the values present in the rows.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyze;
pub mod config;
pub mod data;
pub mod error;
pub mod output;
pub mod report;
pub mod stats;

pub use analyze::{analyze, run};
pub use config::Config;
pub use data::{Dataset, Observation, TreatmentPair};
pub use error::{AnalysisError, ValidationWarning};
pub use report::{OmnibusTest, Outcome, PairComparison, PostHoc};
