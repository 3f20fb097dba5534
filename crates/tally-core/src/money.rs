//! Amount validation shared by income and expense mutations.

use crate::CoreError;

// Tolerance when checking that an amount lands on a whole number of cents;
// covers binary-float representations of values such as 0.07.
const CENT_EPSILON: f64 = 1e-6;

/// Accepts finite, non-negative amounts representable to two fractional
/// digits; everything else is rejected with [`CoreError::InvalidAmount`].
pub fn validate_amount(value: f64) -> Result<f64, CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::InvalidAmount(value));
    }
    let cents = value * 100.0;
    if (cents - cents.round()).abs() > CENT_EPSILON {
        return Err(CoreError::InvalidAmount(value));
    }
    Ok(value)
}

/// Rounds a derived figure to whole cents, keeping sums of valid amounts
/// free of accumulated binary-float drift.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
