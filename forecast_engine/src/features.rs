//! Training example construction for the tree ensemble
//!
//! Turns a raw price sequence into (feature vector, target) pairs using a
//! sliding window of normalized recent prices plus RSI- and moving-average-
//! derived scalars. Examples are rebuilt from scratch on every forecast
//! call and never persisted.

use crate::indicators::{moving_average, relative_strength_index, DEFAULT_RSI_PERIOD};

/// Default sliding window of prices per feature vector
pub const DEFAULT_FEATURE_WINDOW: usize = 7;

/// One (feature vector, target) training pair.
///
/// The feature vector is `window` normalized price deviations followed by
/// RSI/100 and the relative gap between the 7-day moving average and the
/// current price. The target is the next day's raw price.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub features: Vec<f64>,
    pub target: f64,
}

/// Normalize a window of prices as deviations from its own mean.
///
/// Each deviation is `(price - mean) / mean`, or 0 when the mean is 0.
pub fn normalize_window(prices: &[f64]) -> Vec<f64> {
    let mean = if prices.is_empty() {
        0.0
    } else {
        prices.iter().sum::<f64>() / prices.len() as f64
    };

    prices
        .iter()
        .map(|&p| if mean != 0.0 { (p - mean) / mean } else { 0.0 })
        .collect()
}

/// Build training examples from a price sequence.
///
/// One example per index i in `window ..= len - 2`: features from the
/// `window` prices ending just before i, target `values[i + 1]`. Produces
/// nothing when the input is shorter than `window + 2`.
pub fn build_features(values: &[f64], window: usize) -> Vec<TrainingExample> {
    let mut examples = Vec::new();
    if values.len() < window + 2 {
        return examples;
    }

    for i in window..values.len() - 1 {
        let mut features = normalize_window(&values[i - window..i]);

        let rsi = relative_strength_index(&values[..=i], DEFAULT_RSI_PERIOD);
        features.push(rsi / 100.0);

        // Trailing 7-day moving average relative to the current price; the
        // raw price stands in when the trailing slice is too short.
        let trailing = &values[i.saturating_sub(7)..=i];
        let ma = if trailing.len() >= 7 {
            moving_average(trailing, 7)
                .last()
                .copied()
                .unwrap_or(values[i])
        } else {
            values[i]
        };
        features.push((ma - values[i]) / values[i]);

        examples.push(TrainingExample {
            features,
            target: values[i + 1],
        });
    }

    examples
}
