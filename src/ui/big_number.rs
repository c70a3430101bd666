//! Display formatting for arbitrarily long decimal integers.
//!
//! Values arrive as digit strings because they can be far beyond any native
//! integer width. Nothing here parses them numerically; every transformation
//! works on the text.

use itertools::Itertools;

use crate::config::DISPLAY;
use crate::domain::DisplayMode;

/// Render `value` for display in the given mode.
///
/// - Full: unchanged.
/// - Scientific: `d.ddddd × 10^e` (see [`to_scientific`]).
/// - Compact:
///   - up to 50 digits: full value with thousands separators (`1 234 567`)
///   - 51-100 digits: first 40 (separated) + `...` + last 20 (lossy preview)
///   - more: same as scientific
///
/// Never fails: an empty value or the overflow sentinel yields
/// `Error: Number too large`, any other non-digit content yields
/// `Error: Invalid number`.
pub fn format(value: &str, mode: DisplayMode) -> String {
    if value.is_empty() || value == DISPLAY.overflow_sentinel {
        return DISPLAY.too_large_message.to_string();
    }
    if !is_digit_string(value) {
        return DISPLAY.invalid_message.to_string();
    }

    match mode {
        DisplayMode::Full => value.to_string(),
        DisplayMode::Scientific => to_scientific(value),
        DisplayMode::Compact => to_compact(value),
    }
}

fn to_compact(value: &str) -> String {
    let thresholds = &DISPLAY.compact;
    let num_digits = value.len();

    if num_digits <= thresholds.full_max_digits {
        add_thousands_separators(value)
    } else if num_digits <= thresholds.preview_max_digits {
        // ASCII only (checked by the caller) so byte slicing is safe
        let head = &value[..thresholds.preview_head_digits];
        let tail = &value[num_digits - thresholds.preview_tail_digits..];
        format!(
            "{}{}{}",
            add_thousands_separators(head),
            DISPLAY.ellipsis,
            tail
        )
    } else {
        to_scientific(value)
    }
}

/// Mantissa of the leading digit plus up to five more, exponent `len - 1`.
///
/// This is an approximation for reading, not a rounded value: the digits after
/// the mantissa are dropped, so `199999999` becomes `1.99999 × 10^8`.
/// A single-digit value has no fractional part and renders as `7 × 10^0`;
/// no trailing point is printed (`7 × 10^0`, not `7. × 10^0`).
pub fn to_scientific(value: &str) -> String {
    let exponent = value.len().saturating_sub(1);
    let (lead, rest) = value.split_at(1.min(value.len()));
    let fraction = &rest[..DISPLAY.mantissa_fraction_digits.min(rest.len())];

    if fraction.is_empty() {
        format!("{} × 10^{}", lead, exponent)
    } else {
        format!("{}.{} × 10^{}", lead, fraction, exponent)
    }
}

/// Insert a separator every 3 digits counted from the right.
pub fn add_thousands_separators(digits: &str) -> String {
    let separator = DISPLAY.thousands_separator.to_string();
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|group| group.iter().map(|&b| b as char).collect::<String>())
        .join(&separator)
}

/// Human-readable size of the value when stored one byte per digit.
pub fn format_size(digits: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;

    if digits < KIB {
        format!("{} bytes", digits)
    } else if digits < MIB {
        format!("{:.1} KB", digits as f64 / KIB as f64)
    } else {
        format!("{:.2} MB", digits as f64 / MIB as f64)
    }
}

/// The size badge is only shown for values too long to read at a glance.
pub fn size_badge(digits: usize) -> Option<String> {
    (digits > DISPLAY.size_badge_min_digits).then(|| format_size(digits))
}

fn is_digit_string(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}
