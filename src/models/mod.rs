// Derived views over the result history
// These modules contain pure logic independent of terminal rendering

pub mod chart_series;

// Re-export key types for convenience
pub use chart_series::{ChartPoint, GrowthSeries, project};
