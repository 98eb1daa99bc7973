//! Mathematical utility functions for statistical analysis
//!
//! Rounding and percentage helpers with the zero-division handling the
//! dashboard expects.

/// Round to a fixed number of decimal places, half away from zero
///
/// # Examples
/// ```
/// use ledger_analytics::utils::math::round_to;
///
/// assert_eq!(round_to(2.000005, 2), 2.0);
/// assert_eq!(round_to(1.005_1, 2), 1.01);
/// assert_eq!(round_to(66.666, 1), 66.7);
/// ```
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Success percentage to one decimal place; 100.0 for an empty sample
///
/// An empty sample has no known failures, so it reads as fully healthy
/// rather than as a division by zero.
///
/// # Examples
/// ```
/// use ledger_analytics::utils::math::success_percentage;
///
/// assert_eq!(success_percentage(2, 3), 66.7);
/// assert_eq!(success_percentage(0, 4), 0.0);
/// assert_eq!(success_percentage(0, 0), 100.0);
/// ```
#[inline]
pub fn success_percentage(successes: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        ((successes as f64 / total as f64) * 1000.0).round() / 10.0
    }
}
