/// Round a period to the nearest integer and floor it at `min`.
///
/// Non-finite periods collapse to `min`; periods beyond `usize::MAX`
/// saturate at `usize::MAX`.
pub fn round_period(period: f64, min: usize) -> usize {
    if !period.is_finite() {
        return min;
    }
    let rounded = period.round();
    if rounded <= min as f64 {
        min
    } else if rounded >= usize::MAX as f64 {
        usize::MAX
    } else {
        rounded as usize
    }
}

/// Sum of absolute differences between consecutive values
pub fn path_length(values: &[f64]) -> f64 {
    values.windows(2).map(|w| (w[1] - w[0]).abs()).sum()
}

/// Returns `Some(v)` only when `v` is a finite number
pub fn finite(v: f64) -> Option<f64> {
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}
