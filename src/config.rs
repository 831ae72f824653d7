//! Configuration for the analysis pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Options controlling printing, significance gating, and the diagnostic
/// plots.
///
/// All fields have defaults matching the conventional analysis: print the
/// omnibus result, run the post-hoc stage when significant at 0.05, and
/// render both plots with per-block colors and no jitter.
///
/// # Example
///
/// ```
/// use blockrank::Config;
///
/// let config = Config::default()
///     .significance_level(0.01)
///     .plot_boxplot(false);
/// assert_eq!(config.significance_level, 0.01);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Print the omnibus test result (and post-hoc table or short-circuit
    /// notice) to standard output.
    pub print_friedman: bool,

    /// Gate the post-hoc and plotting stages on the significance threshold.
    ///
    /// When false, the pipeline stops after the omnibus test regardless of
    /// its p-value and the outcome takes the short-circuit arm.
    pub post_hoc_if_significant: bool,

    /// Render the parallel-coordinates plot on the significant path.
    pub plot_parallel: bool,

    /// Render the pairwise-differences boxplot on the significant path.
    pub plot_boxplot: bool,

    /// Threshold compared against the omnibus p-value.
    pub significance_level: f64,

    /// Give each block a distinct hue in the parallel plot; uniform black
    /// otherwise.
    pub color_blocks_in_plot: bool,

    /// Add small random noise to plotted responses to reduce overplotting.
    ///
    /// Plot-only legibility aid; it never influences any returned number.
    pub jitter_response_in_plot: bool,

    /// Seed for the jitter stream, so renders are reproducible.
    pub jitter_seed: u64,

    /// Output file for the parallel-coordinates plot (SVG).
    pub parallel_path: PathBuf,

    /// Output file for the differences boxplot (SVG).
    pub boxplot_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            print_friedman: true,
            post_hoc_if_significant: true,
            plot_parallel: true,
            plot_boxplot: true,
            significance_level: 0.05,
            color_blocks_in_plot: true,
            jitter_response_in_plot: false,
            jitter_seed: 0x626c6f636b,
            parallel_path: PathBuf::from("parallel.svg"),
            boxplot_path: PathBuf::from("differences.svg"),
        }
    }
}

impl Config {
    /// Set whether the omnibus result is printed.
    pub fn print_friedman(mut self, enabled: bool) -> Self {
        self.print_friedman = enabled;
        self
    }

    /// Set whether stages 3-4 are gated on significance.
    pub fn post_hoc_if_significant(mut self, enabled: bool) -> Self {
        self.post_hoc_if_significant = enabled;
        self
    }

    /// Enable or disable the parallel-coordinates plot.
    pub fn plot_parallel(mut self, enabled: bool) -> Self {
        self.plot_parallel = enabled;
        self
    }

    /// Enable or disable the differences boxplot.
    pub fn plot_boxplot(mut self, enabled: bool) -> Self {
        self.plot_boxplot = enabled;
        self
    }

    /// Set the significance threshold for the omnibus p-value.
    pub fn significance_level(mut self, alpha: f64) -> Self {
        self.significance_level = alpha;
        self
    }

    /// Color blocks distinctly in the parallel plot.
    pub fn color_blocks_in_plot(mut self, enabled: bool) -> Self {
        self.color_blocks_in_plot = enabled;
        self
    }

    /// Jitter plotted responses for legibility.
    pub fn jitter_response_in_plot(mut self, enabled: bool) -> Self {
        self.jitter_response_in_plot = enabled;
        self
    }

    /// Set the jitter seed.
    pub fn jitter_seed(mut self, seed: u64) -> Self {
        self.jitter_seed = seed;
        self
    }

    /// Set the parallel-coordinates output path.
    pub fn parallel_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.parallel_path = path.into();
        self
    }

    /// Set the boxplot output path.
    pub fn boxplot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.boxplot_path = path.into();
        self
    }
}
