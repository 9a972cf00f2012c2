//! Linearly weighted moving average over a series with missing samples.

/// Weighted moving average with weights `period, period-1, .., 1`, newest first.
///
/// The output has the same length as `values`. Index `i` is `None` while
/// `i < period - 1` or when any sample in `i - period + 1..=i` is missing.
/// A `period` of 0 is treated as 1.
pub fn wma(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let period = period.max(1);
    if period > values.len() {
        return vec![None; values.len()];
    }
    let p = period as f64;
    let denominator = p * (p + 1.0) / 2.0;

    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let window = &values[i + 1 - period..=i];
            // normalized weights keep the sum within the range of the inputs
            window
                .iter()
                .enumerate()
                .try_fold(0.0, |acc, (k, v)| {
                    v.map(|v| acc + v * ((k + 1) as f64 / denominator))
                })
                .filter(|sum: &f64| sum.is_finite())
        })
        .collect()
}
