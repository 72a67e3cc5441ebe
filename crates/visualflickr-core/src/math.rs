//! Shared math utilities.

/// Round to a fixed number of decimal places (half away from zero).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to the three decimals every score and average is reported with.
pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}

/// Mean of a running sum, rounded to three decimals. `None` when `count` is zero.
pub fn mean3(sum: f64, count: usize) -> Option<f64> {
    (count > 0).then(|| round3(sum / count as f64))
}

/// Express `value` as a percentage of `max`, rounded to one decimal.
pub fn percentage(value: f64, max: f64) -> f64 {
    round_to(100.0 * value / max, 1)
}
