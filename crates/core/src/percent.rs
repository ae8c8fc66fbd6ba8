//! Percentage math shared by aggregation and comparison.
//!
//! All zero-denominator handling lives here.

/// `part / whole * 100`, or 0 when `whole` is 0.
pub fn share(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Percentage change from `previous` to `current`.
///
/// With a zero baseline the change is +100 when anything appeared and 0 when
/// both periods are empty.
pub fn change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Mean of the values, or 0 for an empty set.
pub fn mean(sum: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Rounds to one decimal place for presentation.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
