//! Plain-text renderers. Each takes state by reference and returns the text
//! to print; none of them touch the terminal or hold state of their own.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use strum::IntoEnumIterator;

use crate::config::CHART_CONFIG;
use crate::domain::{DisplayMode, HistoryEntry, SequenceResult};
use crate::models::{ChartPoint, GrowthSeries};
use crate::ui::big_number;
use crate::ui::view_state::ViewState;
use crate::utils::time_utils::{age_label, format_recorded_at, how_many_seconds_ago};

/// Mode tabs with the active one bracketed: `[Compact]  Scientific  Full`
pub fn mode_tabs(active: DisplayMode) -> String {
    DisplayMode::iter()
        .map(|mode| {
            if mode == active {
                format!("[{}]", mode.label())
            } else {
                mode.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_result(result: &SequenceResult, mode: DisplayMode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "LabSeq({})", result.index);

    let mut badges = vec![format!("{} digits", result.digit_count)];
    if let Some(size) = big_number::size_badge(result.digit_count) {
        badges.push(format!("{} size", size));
    }
    badges.push(format!("{}ms", result.compute_time_ms));
    if result.from_cache {
        badges.push("from cache".to_string());
    }
    let _ = writeln!(out, "{}", badges.join(" | "));
    let _ = writeln!(out, "{}", mode_tabs(mode));
    let _ = write!(out, "{}", big_number::format(&result.value, mode));
    out
}

/// Result panel for the whole view: error, loading, result or nothing.
pub fn render_view(view: &ViewState) -> String {
    if let Some(error) = &view.error {
        return error.clone();
    }
    if view.loading {
        return "Calculating...".to_string();
    }
    match &view.result {
        Some(result) => render_result(result, view.display_mode),
        None => String::new(),
    }
}

pub fn render_history(entries: &[HistoryEntry], mode: DisplayMode, now: &DateTime<Utc>) -> String {
    if entries.is_empty() {
        return "No calculations yet.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Recent calculations ({}):", entries.len());
    for entry in entries {
        let age = age_label(how_many_seconds_ago(&entry.recorded_at, now));
        let _ = writeln!(
            out,
            "  n={:<8} {:>6} digits {:>6}ms{}  {} ({})",
            entry.index(),
            entry.digit_count(),
            entry.result.compute_time_ms,
            if entry.result.from_cache { " cached" } else { "" },
            format_recorded_at(&entry.recorded_at),
            age,
        );
        let _ = writeln!(out, "      {}", big_number::format(entry.value(), mode));
    }
    out.trim_end().to_string()
}

/// Horizontal bar chart of digit count against index.
pub fn render_chart(points: &[ChartPoint]) -> String {
    let Some(series) = GrowthSeries::from_points(points) else {
        return "No data to chart.".to_string();
    };

    let max_digits = series.max_digits().max(1);
    let label_width = series.labels.iter().map(String::len).max().unwrap_or(1);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} by {}",
        CHART_CONFIG.y_axis_title, CHART_CONFIG.x_axis_title
    );
    for ((label, digits), time) in series
        .labels
        .iter()
        .zip(&series.digits)
        .zip(&series.compute_times)
    {
        let bar_len = (digits * CHART_CONFIG.bar_width).div_ceil(max_digits);
        let bar: String = std::iter::repeat_n(CHART_CONFIG.bar_glyph, bar_len).collect();
        let _ = writeln!(
            out,
            "{:>width$} | {:<bar_width$} {} ({}ms)",
            label,
            bar,
            digits,
            time,
            width = label_width,
            bar_width = CHART_CONFIG.bar_width,
        );
    }
    out.trim_end().to_string()
}
