//! Diagnostic plot rendering.
//!
//! Both renderers are pure consumers of the dataset and the post-hoc result:
//! they draw to an SVG file and never mutate or influence the statistics.
//! The optional jitter is a plot-only legibility aid drawn from a seeded
//! generator, so renders are reproducible.

use plotters::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::config::Config;
use crate::data::Dataset;
use crate::error::AnalysisError;
use crate::report::PostHoc;

const PLOT_SIZE: (u32, u32) = (900, 600);

fn plot_err(e: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Plot(e.to_string())
}

/// Median of a slice; averages the middle pair for even lengths.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Render the parallel-coordinates plot: one polyline per block across the
/// treatment levels in observed order, with a filled marker at each level's
/// median across blocks.
///
/// Block hues come from the plotters palette when
/// `config.color_blocks_in_plot` is set, uniform black otherwise. When
/// `config.jitter_response_in_plot` is set, plotted responses get small
/// seeded noise; medians are computed from the raw values.
pub fn parallel_coordinates(dataset: &Dataset, config: &Config) -> Result<(), AnalysisError> {
    let k = dataset.k();
    let n = dataset.n_blocks();

    // Plotted values, jittered only for display.
    let mut values: Vec<Vec<f64>> = (0..n)
        .map(|b| dataset.block_responses(b).to_vec())
        .collect();
    if config.jitter_response_in_plot {
        let flat_min = values
            .iter()
            .flatten()
            .fold(f64::INFINITY, |a, &v| a.min(v));
        let flat_max = values
            .iter()
            .flatten()
            .fold(f64::NEG_INFINITY, |a, &v| a.max(v));
        let span = flat_max - flat_min;
        let amplitude = if span > 0.0 { span * 0.02 } else { 0.5 };
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.jitter_seed);
        for row in &mut values {
            for v in row.iter_mut() {
                *v += rng.gen_range(-amplitude..=amplitude);
            }
        }
    }

    let medians: Vec<f64> = (0..k)
        .map(|l| {
            let column: Vec<f64> = (0..n).map(|b| dataset.response(b, l)).collect();
            median(&column)
        })
        .collect();

    let y_min = values
        .iter()
        .flatten()
        .chain(medians.iter())
        .fold(f64::INFINITY, |a, &v| a.min(v));
    let y_max = values
        .iter()
        .flatten()
        .chain(medians.iter())
        .fold(f64::NEG_INFINITY, |a, &v| a.max(v));
    let pad = if y_max > y_min {
        (y_max - y_min) * 0.05
    } else {
        1.0
    };

    let root = SVGBackend::new(&config.parallel_path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Responses per block across treatment levels", ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(-1..k as i32, (y_min - pad)..(y_max + pad))
        .map_err(plot_err)?;

    let levels = dataset.levels().to_vec();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(k + 2)
        .x_label_formatter(&|x: &i32| {
            usize::try_from(*x)
                .ok()
                .and_then(|i| levels.get(i).cloned())
                .unwrap_or_default()
        })
        .y_desc("response")
        .draw()
        .map_err(plot_err)?;

    for b in 0..n {
        let color = if config.color_blocks_in_plot {
            Palette99::pick(b).to_rgba()
        } else {
            BLACK.to_rgba()
        };
        let points: Vec<(i32, f64)> = values[b]
            .iter()
            .enumerate()
            .map(|(l, &v)| (l as i32, v))
            .collect();
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(plot_err)?;
    }

    chart
        .draw_series(
            medians
                .iter()
                .enumerate()
                .map(|(l, &m)| Circle::new((l as i32, m), 5, BLACK.filled())),
        )
        .map_err(plot_err)?
        .label("per-level median")
        .legend(|(x, y)| Circle::new((x + 6, y), 4, BLACK.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)
}

/// Render the pairwise-differences boxplot: one box per level pair (within-
/// block differences `level_b - level_a`), red when the adjusted p-value is
/// below 0.05 and blue otherwise, with a legend listing each pair's rounded
/// adjusted p-value and a horizontal reference line at zero.
///
/// Box ordering is the canonical pair enumeration, identical to the p-value
/// ordering in `post_hoc`.
pub fn differences_boxplot(
    dataset: &Dataset,
    post_hoc: &PostHoc,
    config: &Config,
) -> Result<(), AnalysisError> {
    let pairs = dataset.pairs();
    if pairs.len() != post_hoc.comparisons.len() {
        return Err(AnalysisError::Plot(format!(
            "post-hoc result covers {} pairs but the dataset has {}",
            post_hoc.comparisons.len(),
            pairs.len()
        )));
    }

    let differences: Vec<Vec<f64>> = pairs
        .iter()
        .map(|&pair| dataset.pair_differences(pair))
        .collect();

    let mut y_min = 0.0_f64;
    let mut y_max = 0.0_f64;
    for d in differences.iter().flatten() {
        y_min = y_min.min(*d);
        y_max = y_max.max(*d);
    }
    let pad = if y_max > y_min {
        (y_max - y_min) * 0.08
    } else {
        1.0
    };
    let y_range = (y_min - pad) as f32..(y_max + pad) as f32;

    let root = SVGBackend::new(&config.boxplot_path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let m = pairs.len() as i32;
    let mut chart = ChartBuilder::on(&root)
        .caption("Within-block differences between treatment levels", ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d((0..m).into_segmented(), y_range)
        .map_err(plot_err)?;

    let labels: Vec<String> = post_hoc.comparisons.iter().map(|c| c.label.clone()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|x: &SegmentValue<i32>| match x {
            SegmentValue::CenterOf(i) => usize::try_from(*i)
                .ok()
                .and_then(|i| labels.get(i).cloned())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc("difference")
        .draw()
        .map_err(plot_err)?;

    // Zero-difference reference line across the full axis.
    chart
        .draw_series(LineSeries::new(
            [
                (SegmentValue::Exact(0), 0.0_f32),
                (SegmentValue::Last, 0.0_f32),
            ],
            BLACK.stroke_width(1),
        ))
        .map_err(plot_err)?;

    for (i, (diffs, comparison)) in differences.iter().zip(&post_hoc.comparisons).enumerate() {
        let significant = comparison.adjusted_p < 0.05;
        let color = if significant { RED } else { BLUE };
        let quartiles = Quartiles::new(diffs);
        chart
            .draw_series(std::iter::once(
                Boxplot::new_vertical(SegmentValue::CenterOf(i as i32), &quartiles)
                    .width(24)
                    .whisker_width(0.6)
                    .style(color),
            ))
            .map_err(plot_err)?
            .label(format!("{}: p = {:.3}", comparison.label, comparison.adjusted_p))
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 4), (x + 12, y + 4)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_odd_and_even_slices() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
    }
}
