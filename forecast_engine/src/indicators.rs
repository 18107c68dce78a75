//! Technical indicator calculations over a raw price sequence
//!
//! Pure functions: every degenerate input has a defined fallback value
//! instead of an error, so callers can feed whatever history they have.

use serde::Serialize;
use statrs::statistics::Statistics;

/// Default smoothing factor for [`exponential_smoothing`]
pub const DEFAULT_ALPHA: f64 = 0.3;
/// Default look-back period for [`relative_strength_index`]
pub const DEFAULT_RSI_PERIOD: usize = 14;
/// Default window for [`bollinger_bands`]
pub const DEFAULT_BOLLINGER_WINDOW: usize = 20;
/// Default band width in standard deviations
pub const DEFAULT_BOLLINGER_STD: f64 = 2.0;

/// Simple moving average over each sliding window of size `window`.
///
/// Input shorter than the window is returned unchanged.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return values.to_vec();
    }

    values
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}

/// Simple exponential smoothing.
///
/// The first output equals the first input; each subsequent output is
/// `alpha * value + (1 - alpha) * previous output`.
pub fn exponential_smoothing(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut smoothed = Vec::with_capacity(values.len());

    for &value in values {
        let next = match smoothed.last() {
            Some(&prev) => alpha * value + (1.0 - alpha) * prev,
            None => value,
        };
        smoothed.push(next);
    }

    smoothed
}

/// Relative Strength Index over the trailing `period` gains and losses.
///
/// Returns the neutral 50 when fewer than `period` values are available or
/// when there are neither gains nor losses; 100 when there are gains but no
/// losses. Always in [0, 100].
pub fn relative_strength_index(values: &[f64], period: usize) -> f64 {
    if values.len() < period {
        return 50.0;
    }

    let deltas: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let gains: Vec<f64> = deltas.iter().copied().filter(|&d| d > 0.0).collect();
    let losses: Vec<f64> = deltas
        .iter()
        .copied()
        .filter(|&d| d < 0.0)
        .map(|d| -d)
        .collect();

    let avg_gain = tail_mean(&gains, period);
    let avg_loss = tail_mean(&losses, period);

    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { 50.0 };
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));
    rsi.clamp(0.0, 100.0)
}

/// Mean of the trailing `period` entries, 0 when there are none
fn tail_mean(values: &[f64], period: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let tail = &values[values.len().saturating_sub(period)..];
    tail.iter().sum::<f64>() / tail.len() as f64
}

/// Bollinger Band snapshot: trailing mean with an envelope of
/// `num_std` standard deviations on each side
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerBands {
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
}

/// Bollinger Bands over the last `window` values.
///
/// Returns `None` when fewer than `window` values are available. Uses the
/// sample standard deviation of the trailing window.
pub fn bollinger_bands(values: &[f64], window: usize, num_std: f64) -> Option<BollingerBands> {
    if window == 0 || values.len() < window {
        return None;
    }

    let last = &values[values.len() - window..];
    let middle = last.iter().mean();
    let std = if last.len() > 1 { last.iter().std_dev() } else { 0.0 };

    Some(BollingerBands {
        middle,
        upper: middle + num_std * std,
        lower: middle - num_std * std,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_moving_average_short_input_unchanged() {
        let values = vec![1.0, 2.0, 3.0];
        assert_eq!(moving_average(&values, 5), values);
    }

    #[test]
    fn test_moving_average_window_means() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let ma = moving_average(&values, 3);
        assert_eq!(ma, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_exponential_smoothing_first_value() {
        let values = vec![10.0, 12.0, 11.0];
        let smoothed = exponential_smoothing(&values, DEFAULT_ALPHA);
        assert_eq!(smoothed[0], 10.0);
        assert_approx_eq!(smoothed[1], 0.3 * 12.0 + 0.7 * 10.0);
    }

    #[test]
    fn test_exponential_smoothing_empty() {
        assert!(exponential_smoothing(&[], DEFAULT_ALPHA).is_empty());
    }

    #[test]
    fn test_rsi_neutral_on_short_input() {
        assert_eq!(relative_strength_index(&[100.0, 101.0], 14), 50.0);
    }

    #[test]
    fn test_rsi_all_gains() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_eq!(relative_strength_index(&values, 14), 100.0);
    }

    #[test]
    fn test_rsi_flat_series_neutral() {
        let values = vec![100.0; 20];
        assert_eq!(relative_strength_index(&values, 14), 50.0);
    }

    #[test]
    fn test_rsi_bounded() {
        let values: Vec<f64> = (0..40)
            .map(|i| 100.0 + ((i * 37) % 11) as f64 - 5.0)
            .collect();
        let rsi = relative_strength_index(&values, 14);
        assert!((0.0..=100.0).contains(&rsi));
    }

    #[test]
    fn test_bollinger_none_below_window() {
        let values = vec![100.0; 19];
        assert!(bollinger_bands(&values, 20, 2.0).is_none());
    }

    #[test]
    fn test_bollinger_envelope() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let bands = bollinger_bands(&values, 20, 2.0).unwrap();

        assert_approx_eq!(bands.middle, 109.5);
        assert!(bands.upper > bands.middle);
        assert!(bands.lower < bands.middle);
        assert_approx_eq!(bands.upper - bands.middle, bands.middle - bands.lower);
    }
}
