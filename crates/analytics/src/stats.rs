use chrono::{Duration, NaiveDateTime};

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (N - 1 denominator). NaN for fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Percent change from `before` to `after`. NaN when `before` is zero or NaN.
pub fn pct_change(before: f64, after: f64) -> f64 {
    if before == 0.0 || before.is_nan() {
        return f64::NAN;
    }
    (after - before) / before * 100.0
}

/// The inclusive range `[center - days, center + days]`, clamped to the representable
/// date range.
pub fn day_window(center: NaiveDateTime, days: u32) -> (NaiveDateTime, NaiveDateTime) {
    let span = Duration::days(i64::from(days));
    let start = center
        .checked_sub_signed(span)
        .unwrap_or(NaiveDateTime::MIN);
    let end = center
        .checked_add_signed(span)
        .unwrap_or(NaiveDateTime::MAX);
    (start, end)
}

/// Whole days in `delta`, floored: -36 hours is -2 days, +36 hours is 1 day.
pub fn floor_days(delta: Duration) -> i64 {
    let days = delta.num_days();
    if delta < Duration::days(days) {
        days - 1
    } else {
        days
    }
}
