//! Efficiency-ratio driven exponential smoothing (Kaufman style).
//!
//! The smoothing constant slides between a fast and a slow EMA constant
//! depending on how directional the recent path was:
//!
//! - ER = |last - first| / sum(|x[i] - x[i-1]|) over the lookback window
//! - SC = (ER * (fast_sc - slow_sc) + slow_sc)^2
//! - out = prev + SC * (x - prev)

use crate::common::utils::path_length;

/// Standard EMA constant `2 / (period + 1)`
pub fn smoothing_constant_for_period(period: f64) -> f64 {
    2.0 / (period + 1.0)
}

/// Net change over path length; 0 for a flat window or one with < 2 values
///
/// A window whose path length overflows `f64` is rescaled into `[-1, 1]`
/// first; the ratio itself is scale free.
pub fn efficiency_ratio(window: &[f64]) -> f64 {
    let (first, last) = match (window.first(), window.last()) {
        (Some(first), Some(last)) if window.len() >= 2 => (*first, *last),
        _ => return 0.0,
    };
    let mut change = (last - first).abs();
    let mut volatility = path_length(window);

    if !change.is_finite() || !volatility.is_finite() {
        let scale = window.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let scaled: Vec<f64> = window.iter().map(|v| v / scale).collect();
        change = (scaled[scaled.len() - 1] - scaled[0]).abs();
        volatility = path_length(&scaled);
    }

    if volatility == 0.0 || !volatility.is_finite() {
        return 0.0;
    }
    let er = change / volatility;
    if er.is_finite() {
        er.min(1.0)
    } else {
        0.0
    }
}

pub fn smoothing_constant(er: f64, fast_sc: f64, slow_sc: f64) -> f64 {
    (er * (fast_sc - slow_sc) + slow_sc).powi(2)
}

/// Adaptive smoothing of a series that may contain gaps.
///
/// A missing input yields a missing output and leaves the running value
/// untouched. The first present input seeds the output. The lookback covers
/// positions `i + 1 - window..=i`, so gaps inside it shrink the sample count;
/// with fewer than two samples the input passes through unchanged.
pub fn adaptive_smooth(
    values: &[Option<f64>],
    window: usize,
    fast_period: f64,
    slow_period: f64,
) -> Vec<Option<f64>> {
    let window = window.max(2);
    let fast_sc = smoothing_constant_for_period(fast_period);
    let slow_sc = smoothing_constant_for_period(slow_period);

    let mut previous: Option<f64> = None;
    let mut result = Vec::with_capacity(values.len());
    let mut lookback: Vec<f64> = Vec::with_capacity(window.min(values.len()));

    for (i, value) in values.iter().enumerate() {
        let current = match value {
            Some(v) => *v,
            None => {
                result.push(None);
                continue;
            }
        };

        let next = match previous {
            None => current,
            Some(prev) => {
                let start = (i + 1).saturating_sub(window);
                lookback.clear();
                lookback.extend(values[start..=i].iter().flatten());

                if lookback.len() < 2 {
                    current
                } else {
                    let er = efficiency_ratio(&lookback);
                    let sc = smoothing_constant(er, fast_sc, slow_sc);
                    let step = prev + sc * (current - prev);
                    if step.is_finite() {
                        step
                    } else {
                        // current - prev overflowed; blend without the difference
                        prev * (1.0 - sc) + current * sc
                    }
                }
            }
        };

        previous = Some(next);
        result.push(Some(next));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_period_constants() {
        assert!((smoothing_constant_for_period(2.0) - 2.0 / 3.0).abs() < EPS);
        assert!((smoothing_constant_for_period(30.0) - 2.0 / 31.0).abs() < EPS);
    }

    #[test]
    fn test_efficiency_ratio_trend() {
        assert!((efficiency_ratio(&[1.0, 2.0, 3.0, 4.0]) - 1.0).abs() < EPS);
        assert!((efficiency_ratio(&[4.0, 3.0, 2.5]) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_efficiency_ratio_chop() {
        assert_eq!(efficiency_ratio(&[1.0, 2.0, 1.0, 2.0, 1.0]), 0.0);
        // net 1, path 3
        assert!((efficiency_ratio(&[1.0, 2.0, 1.0, 2.0]) - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_efficiency_ratio_degenerate() {
        assert_eq!(efficiency_ratio(&[]), 0.0);
        assert_eq!(efficiency_ratio(&[5.0]), 0.0);
        assert_eq!(efficiency_ratio(&[5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_smoothing_constant_bounds() {
        let fast = smoothing_constant_for_period(2.0);
        let slow = smoothing_constant_for_period(30.0);
        assert!((smoothing_constant(1.0, fast, slow) - fast * fast).abs() < EPS);
        assert!((smoothing_constant(0.0, fast, slow) - slow * slow).abs() < EPS);
        let mid = smoothing_constant(0.5, fast, slow);
        assert!(mid > slow * slow && mid < fast * fast);
    }

    #[test]
    fn test_seed_and_step() {
        let values = vec![None, Some(10.0), Some(12.0)];
        let result = adaptive_smooth(&values, 3, 2.0, 5.0);
        assert_eq!(result[0], None);
        assert_eq!(result[1], Some(10.0));
        // window [10, 12] is a pure trend: sc = (2/3)^2
        let expected = 10.0 + (4.0 / 9.0) * 2.0;
        assert!((result[2].unwrap() - expected).abs() < EPS);
    }

    #[test]
    fn test_gap_is_invisible_to_running_value() {
        let values = vec![Some(10.0), None, None, Some(11.0), Some(12.0)];
        let result = adaptive_smooth(&values, 2, 2.0, 5.0);
        assert_eq!(result[1], None);
        assert_eq!(result[2], None);
        // lookback 2..=3 holds only one sample: pass through
        assert_eq!(result[3], Some(11.0));
        let expected = 11.0 + (4.0 / 9.0) * 1.0;
        assert!((result[4].unwrap() - expected).abs() < EPS);
    }

    #[test]
    fn test_flat_series_stays_flat() {
        let values = vec![Some(7.0); 10];
        let result = adaptive_smooth(&values, 4, 2.0, 30.0);
        assert!(result.iter().all(|v| *v == Some(7.0)));
    }

    #[test]
    fn test_choppy_series_moves_slowly() {
        let values: Vec<Option<f64>> = (0..21)
            .map(|i| Some(if i % 2 == 0 { 100.0 } else { 101.0 }))
            .collect();
        let result = adaptive_smooth(&values, 5, 2.0, 30.0);
        let slow = smoothing_constant_for_period(30.0);
        // odd-length windows of an alternating series have zero net change
        let prev = result[19].unwrap();
        let expected = prev + slow * slow * (100.0 - prev);
        assert!((result[20].unwrap() - expected).abs() < EPS);
        assert!(result.iter().flatten().all(|v| (100.0..=101.0).contains(v)));
    }

    #[test]
    fn test_efficiency_ratio_near_f64_max() {
        let er = efficiency_ratio(&[-f64::MAX, f64::MAX]);
        assert!((er - 1.0).abs() < EPS);
        let er = efficiency_ratio(&[-f64::MAX, f64::MAX, -f64::MAX]);
        assert_eq!(er, 0.0);
        let er = efficiency_ratio(&[f64::MAX, -f64::MAX, 0.0]);
        assert!((er - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_extreme_swings_stay_finite() {
        let values: Vec<Option<f64>> = (0..12)
            .map(|i| Some(if i % 3 == 0 { f64::MAX } else { -f64::MAX }))
            .collect();
        let result = adaptive_smooth(&values, 3, 2.0, 30.0);
        assert_eq!(result.len(), values.len());
        assert!(result.iter().all(|v| v.is_some_and(f64::is_finite)));
    }

    #[test]
    fn test_huge_window() {
        let values = vec![Some(1.0), Some(2.0), Some(3.0)];
        for window in [1_000_000_000_000, usize::MAX] {
            let result = adaptive_smooth(&values, window, 2.0, 30.0);
            assert_eq!(result, adaptive_smooth(&values, 3, 2.0, 30.0));
        }
    }

    #[test]
    fn test_empty() {
        assert!(adaptive_smooth(&[], 14, 2.0, 30.0).is_empty());
    }
}
