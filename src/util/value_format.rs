//! Display formatting for aggregate values.

/// Formats a value with the panel's prefix/postfix and a fixed number of
/// fractional digits.
///
/// Non-finite values render as Rust prints them (`NaN`, `inf`) rather than
/// being masked; a panel showing them has a data problem worth seeing.
pub fn format_value(value: f64, prefix: &str, postfix: &str, decimals: u32) -> String {
    format!("{}{:.*}{}", prefix, decimals as usize, value, postfix)
}
