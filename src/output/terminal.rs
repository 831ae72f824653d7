//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::error::ValidationWarning;
use crate::report::{OmnibusTest, PostHoc};

/// Format the omnibus test result for human-readable terminal output.
pub fn format_omnibus(test: &OmnibusTest) -> String {
    let mut output = String::new();

    output.push_str(&format_box_top());
    output.push_str(&format_box_line(
        &"Friedman rank-sum omnibus test".bold().to_string(),
    ));
    output.push_str(&format_box_separator());

    let design = format!(
        "Design: {} treatment levels x {} blocks",
        test.k, test.n_blocks
    );
    output.push_str(&format_box_line(&design));

    let stat = format!("Max-type statistic: {:.4}", test.statistic);
    output.push_str(&format_box_line(&stat));

    let p_str = format!("p-value: {:.4}", test.p_value);
    let p_colored = if test.p_value < 0.05 {
        p_str.red().bold()
    } else {
        p_str.green()
    };
    output.push_str(&format_box_line(&p_colored.to_string()));

    output.push_str(&format_box_bottom());
    output
}

/// Format the post-hoc comparison table, flagging pairs significant at
/// `alpha`.
pub fn format_post_hoc(post_hoc: &PostHoc, alpha: f64) -> String {
    let mut output = String::new();

    output.push_str(&format_box_top());
    output.push_str(&format_box_line(
        &"Pairwise comparisons (single-step adjusted)"
            .bold()
            .to_string(),
    ));
    output.push_str(&format_box_separator());

    for comparison in &post_hoc.comparisons {
        let line = format!(
            "{:<24} p = {:.4}",
            comparison.label, comparison.adjusted_p
        );
        let colored_line = if comparison.adjusted_p < alpha {
            format!("{} {}", line.red(), "*".red().bold())
        } else {
            line.normal().to_string()
        };
        output.push_str(&format_box_line(&colored_line));
    }

    output.push_str(&format_box_separator());
    let note = format!("* adjusted p < {alpha}");
    output.push_str(&format_box_line(&note.dimmed().to_string()));
    output.push_str(&format_box_bottom());
    output
}

/// Format the notice printed when no post-hoc table follows: either the
/// omnibus result did not reach the threshold, or post-hoc analysis was
/// disabled while the result itself is significant. The two cases get
/// distinct wording so the notice never misstates the comparison.
pub fn format_short_circuit(test: &OmnibusTest, alpha: f64, post_hoc_enabled: bool) -> String {
    let notice = if !post_hoc_enabled && test.p_value < alpha {
        format!(
            "Post-hoc analysis is disabled; only the omnibus result is \
             reported (p = {:.4} < {alpha}).",
            test.p_value
        )
    } else {
        format!(
            "The omnibus test is not significant (p = {:.4} >= {alpha}); \
             post-hoc comparisons and plots were skipped.",
            test.p_value
        )
    };
    format!("{}\n", notice.yellow())
}

/// Format a validation advisory.
pub fn format_warning(warning: ValidationWarning) -> String {
    format!("{} {}", "warning:".yellow().bold(), warning)
}

// Box drawing helpers

const BOX_WIDTH: usize = 60;

fn format_box_top() -> String {
    format!("\u{250C}{}\u{2510}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_bottom() -> String {
    format!("\u{2514}{}\u{2518}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_separator() -> String {
    format!("\u{251C}{}\u{2524}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_line(content: &str) -> String {
    // Strip ANSI codes for length calculation
    let visible_len = strip_ansi_codes(content).chars().count();
    let padding = if visible_len < BOX_WIDTH - 2 {
        BOX_WIDTH - 2 - visible_len
    } else {
        0
    };
    format!("\u{2502} {}{} \u{2502}\n", content, " ".repeat(padding))
}

/// Strip ANSI escape codes for accurate length calculation.
fn strip_ansi_codes(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm' (end of ANSI sequence)
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}
