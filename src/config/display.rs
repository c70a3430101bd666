//! Big-number display configuration

pub struct CompactThresholds {
    /// Values up to this many digits are shown in full (with separators)
    pub full_max_digits: usize,
    /// Values up to this many digits get a head...tail preview
    pub preview_max_digits: usize,
    pub preview_head_digits: usize,
    pub preview_tail_digits: usize,
}

pub struct DisplayConfig {
    pub compact: CompactThresholds,
    /// Digits shown after the point in scientific notation (truncated, not rounded)
    pub mantissa_fraction_digits: usize,
    pub thousands_separator: char,
    pub ellipsis: &'static str,
    /// Marker the service uses for values it could not represent
    pub overflow_sentinel: &'static str,
    pub too_large_message: &'static str,
    pub invalid_message: &'static str,
    /// Size badge is only worth showing above this digit count
    pub size_badge_min_digits: usize,
}

pub const DISPLAY: DisplayConfig = DisplayConfig {
    compact: CompactThresholds {
        full_max_digits: 50,
        preview_max_digits: 100,
        preview_head_digits: 40,
        preview_tail_digits: 20,
    },
    mantissa_fraction_digits: 5,
    thousands_separator: ' ',
    ellipsis: "...",
    overflow_sentinel: "Infinity",
    too_large_message: "Error: Number too large",
    invalid_message: "Error: Invalid number",
    size_badge_min_digits: 50,
};
