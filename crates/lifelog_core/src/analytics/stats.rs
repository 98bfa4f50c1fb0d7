//! Arithmetic shared by every analytics category.

/// Percentage change from `previous` to `current`.
///
/// When `previous` is zero the result is 100 for any positive `current` and
/// 0 otherwise, rather than undefined.
pub fn percentage_change(current: f64, previous: f64) -> f64 {
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

/// `numerator / denominator`, or 0 when the denominator is zero.
pub fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Truncating integer mean; 0 for an empty input.
pub fn truncated_mean(values: impl IntoIterator<Item = usize>) -> u64 {
    let (sum, count) = values
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), value| (sum + value as u64, count + 1));
    if count == 0 {
        0
    } else {
        sum / count
    }
}

/// Arithmetic mean, or `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0u64), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
