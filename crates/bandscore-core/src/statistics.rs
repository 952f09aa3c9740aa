//! Band arithmetic and averaging.
//!
//! Evaluations are expressed on the band scale (0 to 9 in half points);
//! persisted progress is expressed as a percentage (0 to 100). The
//! conversions between the two live here so that every caller converts the
//! same way.

/// Highest band score.
pub const MAX_BAND: f64 = 9.0;

/// Highest percentage score accepted for a section completion.
pub const MAX_PERCENT: f64 = 100.0;

/// Round to the nearest half point (halves round up).
pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

/// Clamp a band score to `[0, 9]`. Non-finite values clamp to 0.
pub fn clamp_band(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, MAX_BAND)
}

/// Band score for `correct` answers out of `total` questions.
///
/// A candidate with at least one correct answer never scores below band 1,
/// even on a long paper where the proportional band would round to 0.
pub fn band_from_fraction(correct: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let band = round_to_half(correct as f64 / total as f64 * MAX_BAND);
    if correct > 0 && band == 0.0 {
        return 1.0;
    }
    clamp_band(band)
}

/// Convert a band score to a percentage, rounded to a whole number.
pub fn band_to_percent(band: f64) -> f64 {
    (clamp_band(band) / MAX_BAND * MAX_PERCENT).round()
}

/// Convert a percentage to a band score in half points.
pub fn percent_to_band(percent: f64) -> f64 {
    if !percent.is_finite() {
        return 0.0;
    }
    let percent = percent.clamp(0.0, MAX_PERCENT);
    clamp_band(round_to_half(percent / MAX_PERCENT * MAX_BAND))
}

/// Arithmetic mean of the finite values, or `None` if there are none.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

/// Mean rounded to the nearest integer, or 0 if there are no values.
pub fn rounded_mean(values: impl IntoIterator<Item = f64>) -> u32 {
    mean(values).map(|m| m.round().max(0.0) as u32).unwrap_or(0)
}
