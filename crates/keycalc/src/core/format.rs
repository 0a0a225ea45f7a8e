//! Result formatting

/// Formats a result for the display.
///
/// Uses the shortest decimal that round-trips, so integral values print
/// without a fraction (`8`, not `8.0`) and binary rounding artifacts stay
/// visible (`0.30000000000000004`). Negative zero prints as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
