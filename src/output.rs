//! CLI output formatting for the render and publish commands.
//!
//! # Output Format
//!
//! ## Render
//!
//! ```text
//! Hello World → post.png (1080×1014)
//!     Description: 3 lines
//!     Code: 1 line
//!     Logo: placed
//! ```
//!
//! When something did not fit, the affected counts say so and a closing
//! notice is printed:
//!
//! ```text
//! Hello World → post.png (1080×1080)
//!     Description: 18 lines (4 dropped)
//!     Code: 6 lines
//!     Logo: missing
//!     Truncated: content did not fit the fixed canvas
//! ```
//!
//! ## Publish
//!
//! ```text
//! Category: Python Programming
//! Hello World → post.png (1080×1014)
//!     Description: 3 lines
//!     ...
//! Caption
//!     Say hello to Python. DM us for tutoring...
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::publish::PublishOutcome;
use crate::render::RenderReport;

/// Longest caption excerpt shown in publish output.
const CAPTION_PREVIEW: usize = 60;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 line`, `3 lines`, `3 lines (2 dropped)`.
fn line_count(kept: usize, dropped: usize) -> String {
    let noun = if kept == 1 { "line" } else { "lines" };
    match dropped {
        0 => format!("{kept} {noun}"),
        n => format!("{kept} {noun} ({n} dropped)"),
    }
}

/// Truncate to `max` characters on a char boundary, appending "...".
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

// ============================================================================
// Render
// ============================================================================

pub fn format_render_report(title: &str, report: &RenderReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} → {} ({}×{})",
        title,
        report.output.display(),
        report.width,
        report.height
    )];
    lines.push(format!(
        "{}Description: {}",
        indent(1),
        line_count(report.description_lines, report.description_dropped)
    ));
    lines.push(format!(
        "{}Code: {}",
        indent(1),
        line_count(report.code_lines, report.code_dropped)
    ));
    let logo = if report.logo_placed { "placed" } else { "missing" };
    lines.push(format!("{}Logo: {logo}", indent(1)));
    if report.truncated() {
        lines.push(format!(
            "{}Truncated: content did not fit the fixed canvas",
            indent(1)
        ));
    }
    lines
}

pub fn print_render_report(title: &str, report: &RenderReport) {
    for line in format_render_report(title, report) {
        println!("{line}");
    }
}

// ============================================================================
// Publish
// ============================================================================

pub fn format_publish_outcome(outcome: &PublishOutcome) -> Vec<String> {
    let mut lines = vec![format!("Category: {}", outcome.category)];
    lines.extend(format_render_report(&outcome.post.title, &outcome.report));
    lines.push("Caption".to_string());
    let first = outcome
        .caption
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("");
    lines.push(format!("{}{}", indent(1), truncate_desc(first.trim(), CAPTION_PREVIEW)));
    lines
}

pub fn print_publish_outcome(outcome: &PublishOutcome) {
    for line in format_publish_outcome(outcome) {
        println!("{line}");
    }
}
