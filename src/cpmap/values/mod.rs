//! Typed field values
//!
//! Each fixed-shape value that can appear in a column has a type here, a
//! `try_parse` that returns `None` for "not this shape" and a `Display` impl that
//! writes the value back in the document grammar.
//!
//! Numbers follow one rendering rule everywhere except where a field always uses
//! fixed decimals (vector coordinates, effect radius, bounce power): whole numbers
//! are written without decimals and fractional numbers with exactly three.

mod effects;
mod malformed;
mod records;
mod vector;

pub use effects::{EffectBounceData, EffectInstanceData, EffectValue, BOUNCE_STATUS, MAX_STATUS};
pub use malformed::MalformedDataPlaceholder;
pub use records::{AbilityCountData, CheckpointMissionData, HiddenCpTtData, RadiusVAGoBackData};
pub use vector::Vector3D;

/// Parse a trimmed float literal. Non-finite results count as unparseable.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a trimmed number for an integer slot, truncating toward zero.
pub fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }
    let n = parse_number(text)?.trunc();
    if n.abs() < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Render a number: whole → no decimals, fractional → three decimals.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Also folds -0 into 0
        "0".to_string()
    } else if n.is_finite() && n.fract() == 0.0 {
        format!("{}", n)
    } else {
        format!("{:.3}", n)
    }
}

/// Literal `True`/`False`, case-insensitive.
pub fn parse_bool_literal(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

pub fn format_bool(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

/// Split the inner text of a flat record on literal commas.
///
/// Returns exactly three trimmed parts or `None`.
pub(crate) fn split_triple(inner: &str) -> Option<[&str; 3]> {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [a, b, c] => Some([*a, *b, *c]),
        _ => None,
    }
}
