use crate::models::domain::Band;

/// Absolute difference at or below this counts as an exact match.
pub const EXACT_TOLERANCE: f64 = 1e-6;

const NEAR_RELATIVE: f64 = 0.05;
const NEAR_ABSOLUTE: f64 = 0.5;

/// Classifies a parsed answer into an outcome band against the stored
/// correct answer.
///
/// The near band is generous on purpose so feedback can acknowledge close
/// attempts: either threshold alone is enough (OR, not AND, between the
/// relative and absolute checks).
pub fn classify(correct: f64, answer: f64) -> Band {
    let abs_diff = (answer - correct).abs();

    if abs_diff <= EXACT_TOLERANCE {
        return Band::Correct;
    }

    let near_by_relative = correct != 0.0 && abs_diff / correct.abs() <= NEAR_RELATIVE;
    if near_by_relative || abs_diff <= NEAR_ABSOLUTE {
        Band::Near
    } else {
        Band::Wrong
    }
}

/// Storage precision for persisted answers. Grading always runs on the
/// unrounded parsed value; only what is written to the store goes through
/// this.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
