//! Pipeline orchestration: validate, test, post-hoc, render.
//!
//! [`analyze`] is the headless statistical core; [`run`] wraps it with the
//! terminal reporting and plot rendering of the full four-stage pipeline.
//! Compute and render are fully separated: the plots are driven only by the
//! dataset and the post-hoc result and never feed anything back.

use crate::config::Config;
use crate::data::Dataset;
use crate::error::AnalysisError;
use crate::output::{plot, terminal};
use crate::report::Outcome;
use crate::stats;

/// Run the statistical stages only: omnibus test, then pairwise post-hoc
/// comparisons when the omnibus p-value falls below the configured
/// threshold.
///
/// No printing, no plotting, no side effects - suitable for headless use
/// and testing.
///
/// # Errors
///
/// Propagates [`AnalysisError::ContrastComputation`] from the statistical
/// machinery. Dataset validation errors have already been raised at
/// [`Dataset`] construction time.
pub fn analyze(dataset: &Dataset, config: &Config) -> Result<Outcome, AnalysisError> {
    let omnibus = stats::omnibus_test(dataset)?;

    if config.post_hoc_if_significant && omnibus.p_value < config.significance_level {
        let post_hoc = stats::adjusted_p_values(dataset, &omnibus)?;
        Ok(Outcome::Significant { omnibus, post_hoc })
    } else {
        Ok(Outcome::NotSignificant { omnibus })
    }
}

/// Run the full pipeline: analysis, terminal reporting, and the enabled
/// diagnostic plots.
///
/// On the significant path this renders the parallel-coordinates plot and
/// the differences boxplot (as configured); on the short-circuit path it
/// prints a not-significant notice and returns only the omnibus result.
/// Advisory warnings recorded on the dataset go to standard error.
///
/// # Errors
///
/// Statistical errors abort before any plotting; plot rendering failures
/// propagate unmodified as [`AnalysisError::Plot`].
pub fn run(dataset: &Dataset, config: &Config) -> Result<Outcome, AnalysisError> {
    for warning in dataset.warnings() {
        eprintln!("{}", terminal::format_warning(*warning));
    }

    let outcome = analyze(dataset, config)?;

    if config.print_friedman {
        print!("{}", terminal::format_omnibus(outcome.omnibus()));
    }

    match &outcome {
        Outcome::Significant { post_hoc, .. } => {
            if config.print_friedman {
                print!(
                    "{}",
                    terminal::format_post_hoc(post_hoc, config.significance_level)
                );
            }
            if config.plot_parallel {
                plot::parallel_coordinates(dataset, config)?;
            }
            if config.plot_boxplot {
                plot::differences_boxplot(dataset, post_hoc, config)?;
            }
        }
        Outcome::NotSignificant { omnibus } => {
            if config.print_friedman {
                print!(
                    "{}",
                    terminal::format_short_circuit(
                        omnibus,
                        config.significance_level,
                        config.post_hoc_if_significant,
                    )
                );
            }
        }
    }

    Ok(outcome)
}
