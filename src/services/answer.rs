use once_cell::sync::Lazy;
use regex::Regex;

static MIXED_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-]?)(\d+)\s+(\d+)\s*/\s*(\d+)$").expect("valid regex"));

static FRACTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-]?)(\d+)\s*/\s*(\d+)$").expect("valid regex"));

/// Normalizes a free-text answer into a numeric value.
///
/// Recognized, in order: mixed number `±W N/D`, simple fraction `±N/D`,
/// plain decimal or integer. Leading/trailing whitespace is tolerated. The
/// sign applies to the whole mixed number, not just the fractional part.
/// Returns `None` for zero denominators, non-finite results, and anything
/// that matches no pattern.
pub fn parse_answer(raw: &str) -> Option<f64> {
    let input = raw.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(caps) = MIXED_NUMBER_RE.captures(input) {
        let sign = if &caps[1] == "-" { -1.0 } else { 1.0 };
        let whole: f64 = caps[2].parse().ok()?;
        let numerator: f64 = caps[3].parse().ok()?;
        let denominator: f64 = caps[4].parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        let value = sign * (whole + numerator / denominator);
        return value.is_finite().then_some(value);
    }

    if let Some(caps) = FRACTION_RE.captures(input) {
        let sign = if &caps[1] == "-" { -1.0 } else { 1.0 };
        let numerator: f64 = caps[2].parse().ok()?;
        let denominator: f64 = caps[3].parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        let value = sign * (numerator / denominator);
        return value.is_finite().then_some(value);
    }

    input.parse::<f64>().ok().filter(|v| v.is_finite())
}
