//! Core allocation logic - framework-agnostic store, validation, merge, and
//! funding-stat operations. Nothing in this module performs I/O; the session
//! layer wires these pieces to the timer and the REST client.

/// Merging server responses back into local rows
pub mod reconciler;
/// Editable allocation rows and their mutation operations
pub mod store;
/// Funding-stat aggregates for display
pub mod stats;
/// Save-time validation of a complete allocation list
pub mod validator;

/// Slack applied to the aggregate percentage/amount checks. Tolerates
/// floating-point drift from percentage/amount round-tripping; the exact
/// value is part of the observable contract and must not change.
pub const AGGREGATE_EPSILON: f64 = 0.0001;

/// Rounds a dollar value to two decimals, half away from zero.
#[must_use]
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Strips everything except digits and `.` from raw field input. Free-text
/// entry like `"12."` or `"$1,250"` must survive mid-typing.
#[must_use]
pub fn sanitize_decimal(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Parses an editable decimal string; `None` for blank or unparseable input.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Formats a percentage for the editable field: whole numbers without a
/// trailing `.0` (an investor minimum of 10 renders as `"10"`, not `"10.0"`).
#[must_use]
pub fn format_percentage(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Formats a dollar amount for the editable field, always two decimals.
#[must_use]
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}
