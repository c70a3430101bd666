//! Chart projection of the result history.
//!
//! History is kept most-recent-first for the list view; a chart needs an
//! increasing x axis, so the projection re-sorts a bounded window by index.

use serde::Serialize;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::CHART_CONFIG;
use crate::domain::{DisplayMode, HistoryEntry};
use crate::ui::big_number;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub index: u64,
    pub digit_count: usize,
    pub compute_time_ms: f64,
    /// Compact rendering of the value, for tooltips
    pub value_preview: String,
}

impl From<&HistoryEntry> for ChartPoint {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            index: entry.index(),
            digit_count: entry.digit_count(),
            compute_time_ms: entry.result.compute_time_ms,
            value_preview: big_number::format(entry.value(), DisplayMode::Compact),
        }
    }
}

/// Take the most recent `CHART_CONFIG.max_points` entries and order them by
/// index ascending. Empty history gives an empty series, not an error.
pub fn project(history: &[HistoryEntry]) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = history
        .iter()
        .take(CHART_CONFIG.max_points)
        .map(ChartPoint::from)
        .collect();
    points.sort_by_key(|point| point.index);

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_chart_projection {
        log::info!("Chart data prepared: {} points", points.len());
    }
    points
}

/// Parallel columns ready for a line chart: digits (and timing) over index.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthSeries {
    pub labels: Vec<String>,
    pub digits: Vec<usize>,
    pub compute_times: Vec<f64>,
}

impl GrowthSeries {
    /// `None` when there is nothing to draw.
    pub fn from_points(points: &[ChartPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            labels: points.iter().map(|p| p.index.to_string()).collect(),
            digits: points.iter().map(|p| p.digit_count).collect(),
            compute_times: points.iter().map(|p| p.compute_time_ms).collect(),
        })
    }

    pub fn max_digits(&self) -> usize {
        self.digits.iter().copied().max().unwrap_or(0)
    }
}
