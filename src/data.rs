//! Dataset model and input normalization.
//!
//! A [`Dataset`] is built from long-format rows of
//! `(response, treatment, block)`. Construction is the explicit
//! normalization step of the pipeline: treatment levels and block labels are
//! interned strictly from the values present in the data (never from a
//! declared superset), missing responses are rejected immediately, and the
//! design is checked for balance before any statistic runs.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, ValidationWarning};

/// One row of a long-format blocked experiment: a single response measured
/// for one treatment level within one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Numeric response. Must be finite; NaN means "missing" and is rejected.
    pub response: f64,
    /// Treatment level label.
    pub treatment: String,
    /// Block label (subject, experimental unit, ...).
    pub block: String,
}

/// An unordered pair of treatment levels, identified by their indices in
/// observed level order, with `first < second`.
///
/// The canonical pair enumeration (all combinations of levels taken two at a
/// time, in observed order) is produced by [`Dataset::pairs`] and shared by
/// the statistics and the plots, so p-value ordering and box labeling can
/// never diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentPair {
    /// Index of the earlier level in observed order.
    pub first: usize,
    /// Index of the later level in observed order.
    pub second: usize,
}

/// A normalized, balanced, blocked dataset.
///
/// Internally the data is stored as an `n_blocks x k` response grid indexed
/// by (block, level) in observed order. The grid is fully populated by
/// construction: [`Dataset::from_rows`] rejects missing responses and
/// unbalanced designs before returning.
///
/// Serialization goes through the long-format [`Observation`] rows, so a
/// deserialized dataset passes the same validation as a constructed one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "Vec<Observation>", try_from = "Vec<Observation>")]
pub struct Dataset {
    levels: Vec<String>,
    blocks: Vec<String>,
    /// `responses[b][l]` = response of block `b` under treatment level `l`.
    responses: Vec<Vec<f64>>,
    warnings: Vec<ValidationWarning>,
}

impl Dataset {
    /// Build a dataset from long-format `(response, treatment, block)` rows.
    ///
    /// Level and block domains are re-derived from the rows in first
    /// appearance order. Each block must contribute exactly one response per
    /// observed treatment level.
    ///
    /// # Errors
    ///
    /// * [`AnalysisError::MissingData`] if any response is NaN or infinite.
    ///   Raised before anything else is computed.
    /// * [`AnalysisError::UnbalancedDesign`] if a block has a missing or
    ///   duplicated (treatment, block) cell.
    pub fn from_rows<I, T, B>(rows: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = (f64, T, B)>,
        T: AsRef<str>,
        B: AsRef<str>,
    {
        let observations: Vec<Observation> = rows
            .into_iter()
            .map(|(response, treatment, block)| Observation {
                response,
                treatment: treatment.as_ref().to_string(),
                block: block.as_ref().to_string(),
            })
            .collect();
        Self::from_observations(observations)
    }

    /// Build a dataset from explicit [`Observation`] rows.
    ///
    /// See [`Dataset::from_rows`] for the validation rules.
    pub fn from_observations(observations: Vec<Observation>) -> Result<Self, AnalysisError> {
        // Missing responses fail before any other processing.
        for (index, obs) in observations.iter().enumerate() {
            if !obs.response.is_finite() {
                return Err(AnalysisError::MissingData { index });
            }
        }

        let mut levels: Vec<String> = Vec::new();
        let mut blocks: Vec<String> = Vec::new();
        for obs in &observations {
            if !levels.iter().any(|l| *l == obs.treatment) {
                levels.push(obs.treatment.clone());
            }
            if !blocks.iter().any(|b| *b == obs.block) {
                blocks.push(obs.block.clone());
            }
        }

        let k = levels.len();
        let n = blocks.len();
        let mut grid: Vec<Vec<Option<f64>>> = vec![vec![None; k]; n];
        for obs in &observations {
            // Indices exist by construction of the level/block lists.
            let l = levels.iter().position(|l| *l == obs.treatment).unwrap();
            let b = blocks.iter().position(|b| *b == obs.block).unwrap();
            if grid[b][l].is_some() {
                return Err(AnalysisError::UnbalancedDesign {
                    block: blocks[b].clone(),
                });
            }
            grid[b][l] = Some(obs.response);
        }

        let mut responses: Vec<Vec<f64>> = Vec::with_capacity(n);
        for (b, row) in grid.into_iter().enumerate() {
            let mut filled = Vec::with_capacity(k);
            for cell in row {
                match cell {
                    Some(v) => filled.push(v),
                    None => {
                        return Err(AnalysisError::UnbalancedDesign {
                            block: blocks[b].clone(),
                        })
                    }
                }
            }
            responses.push(filled);
        }

        let mut warnings = Vec::new();
        if k == 2 {
            warnings.push(ValidationWarning::TwoTreatmentLevels);
        }

        Ok(Self {
            levels,
            blocks,
            responses,
            warnings,
        })
    }

    /// Treatment levels in observed (first appearance) order.
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Block labels in observed order.
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Number of treatment levels, `k`.
    pub fn k(&self) -> usize {
        self.levels.len()
    }

    /// Number of blocks, `n`.
    pub fn n_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Responses of one block across all treatment levels, in level order.
    pub fn block_responses(&self, block: usize) -> &[f64] {
        &self.responses[block]
    }

    /// Response of one block under one treatment level.
    pub fn response(&self, block: usize, level: usize) -> f64 {
        self.responses[block][level]
    }

    /// Advisories recorded during normalization.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Canonical pairwise enumeration: all `k * (k - 1) / 2` unordered level
    /// pairs, iterating levels in observed order, combinations two at a time.
    pub fn pairs(&self) -> Vec<TreatmentPair> {
        let k = self.k();
        let mut pairs = Vec::with_capacity(k * k.saturating_sub(1) / 2);
        for first in 0..k {
            for second in (first + 1)..k {
                pairs.push(TreatmentPair { first, second });
            }
        }
        pairs
    }

    /// Human-readable label for a pair, oriented as `second - first`.
    pub fn pair_label(&self, pair: TreatmentPair) -> String {
        format!("{} - {}", self.levels[pair.second], self.levels[pair.first])
    }

    /// Within-block signed differences for one pair: for every block, the
    /// response under the later level minus the response under the earlier
    /// level. Length equals `n_blocks`.
    pub fn pair_differences(&self, pair: TreatmentPair) -> Vec<f64> {
        self.responses
            .iter()
            .map(|row| row[pair.second] - row[pair.first])
            .collect()
    }
}

impl From<Dataset> for Vec<Observation> {
    fn from(dataset: Dataset) -> Self {
        let mut rows = Vec::with_capacity(dataset.n_blocks() * dataset.k());
        for (b, block) in dataset.blocks.iter().enumerate() {
            for (l, treatment) in dataset.levels.iter().enumerate() {
                rows.push(Observation {
                    response: dataset.responses[b][l],
                    treatment: treatment.clone(),
                    block: block.clone(),
                });
            }
        }
        rows
    }
}

impl TryFrom<Vec<Observation>> for Dataset {
    type Error = AnalysisError;

    fn try_from(observations: Vec<Observation>) -> Result<Self, Self::Error> {
        Self::from_observations(observations)
    }
}
