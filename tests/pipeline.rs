//! End-to-end pipeline tests: plot rendering and the render/compute split.

use std::fs;
use std::path::PathBuf;

use blockrank::{run, Config, Dataset};

fn strong_dataset() -> Dataset {
    let mut rows = Vec::new();
    for b in 0..8 {
        let block = format!("s{b}");
        rows.push((1.0 + b as f64 * 0.02, "low".to_string(), block.clone()));
        rows.push((5.0 + b as f64 * 0.02, "mid".to_string(), block.clone()));
        rows.push((9.0 + b as f64 * 0.02, "high".to_string(), block));
    }
    Dataset::from_rows(rows).unwrap()
}

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("blockrank-{}-{}", std::process::id(), name));
    path
}

#[test]
fn significant_run_renders_both_plots() {
    let parallel = temp_path("parallel.svg");
    let boxplot = temp_path("differences.svg");
    let config = Config::default()
        .print_friedman(false)
        .parallel_path(&parallel)
        .boxplot_path(&boxplot);

    let outcome = run(&strong_dataset(), &config).unwrap();
    assert!(outcome.is_significant());

    let parallel_svg = fs::read_to_string(&parallel).unwrap();
    let boxplot_svg = fs::read_to_string(&boxplot).unwrap();
    assert!(parallel_svg.contains("<svg"));
    assert!(boxplot_svg.contains("<svg"));

    fs::remove_file(parallel).ok();
    fs::remove_file(boxplot).ok();
}

#[test]
fn non_significant_run_renders_nothing() {
    let parallel = temp_path("ns-parallel.svg");
    let boxplot = temp_path("ns-differences.svg");
    let config = Config::default()
        .print_friedman(false)
        .significance_level(1e-15)
        .parallel_path(&parallel)
        .boxplot_path(&boxplot);

    let outcome = run(&strong_dataset(), &config).unwrap();
    assert!(!outcome.is_significant());
    assert!(!parallel.exists(), "short-circuit path must not plot");
    assert!(!boxplot.exists(), "short-circuit path must not plot");
}

#[test]
fn disabled_plots_are_skipped_on_the_significant_path() {
    let parallel = temp_path("off-parallel.svg");
    let boxplot = temp_path("off-differences.svg");
    let config = Config::default()
        .print_friedman(false)
        .plot_parallel(false)
        .plot_boxplot(false)
        .parallel_path(&parallel)
        .boxplot_path(&boxplot);

    let outcome = run(&strong_dataset(), &config).unwrap();
    assert!(outcome.is_significant());
    assert!(!parallel.exists());
    assert!(!boxplot.exists());
}

#[test]
fn jittered_render_leaves_the_outcome_unchanged() {
    let plain_cfg = Config::default()
        .print_friedman(false)
        .plot_boxplot(false)
        .parallel_path(temp_path("plain.svg"));
    let jitter_cfg = Config::default()
        .print_friedman(false)
        .plot_boxplot(false)
        .jitter_response_in_plot(true)
        .jitter_seed(99)
        .parallel_path(temp_path("jittered.svg"));

    let dataset = strong_dataset();
    let plain = run(&dataset, &plain_cfg).unwrap();
    let jittered = run(&dataset, &jitter_cfg).unwrap();
    assert_eq!(plain, jittered);

    fs::remove_file(plain_cfg.parallel_path).ok();
    fs::remove_file(jitter_cfg.parallel_path).ok();
}

#[test]
fn jitter_is_reproducible_for_a_fixed_seed() {
    let first_path = temp_path("seed-a.svg");
    let second_path = temp_path("seed-b.svg");
    let dataset = strong_dataset();

    for path in [&first_path, &second_path] {
        let config = Config::default()
            .print_friedman(false)
            .plot_boxplot(false)
            .jitter_response_in_plot(true)
            .jitter_seed(1234)
            .parallel_path(path);
        run(&dataset, &config).unwrap();
    }

    let first = fs::read_to_string(&first_path).unwrap();
    let second = fs::read_to_string(&second_path).unwrap();
    assert_eq!(first, second, "same seed must render identical plots");

    fs::remove_file(first_path).ok();
    fs::remove_file(second_path).ok();
}
