//! Growth chart configuration

pub struct ChartConfig {
    /// How many of the most recent history entries are plotted
    pub max_points: usize,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    /// Width in characters of the longest bar in the text chart
    pub bar_width: usize,
    pub bar_glyph: char,
}

pub const CHART_CONFIG: ChartConfig = ChartConfig {
    max_points: 10,
    x_axis_title: "Index (n)",
    y_axis_title: "Number of Digits",
    bar_width: 40,
    bar_glyph: '#',
};
