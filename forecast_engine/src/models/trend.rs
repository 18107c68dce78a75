//! Trend estimators: closed-form linear regression and the smoothing- and
//! momentum-based extrapolations used alongside the tree ensemble

use crate::metrics::r_squared;
use serde::Serialize;

/// Result of an ordinary least squares fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl LinearFit {
    /// Fitted value at `x`
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Closed-form ordinary least squares over (xs, ys).
///
/// Zero x-variance (or empty/mismatched input) falls back to slope 0,
/// intercept mean(y), R² 0.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> LinearFit {
    if xs.is_empty() || xs.len() != ys.len() {
        return LinearFit {
            slope: 0.0,
            intercept: 0.0,
            r_squared: 0.0,
        };
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let numerator: f64 = xs
        .iter()
        .zip(ys.iter())
        .map(|(&x, &y)| (x - mean_x) * (y - mean_y))
        .sum();
    let denominator: f64 = xs.iter().map(|&x| (x - mean_x).powi(2)).sum();

    if denominator == 0.0 {
        return LinearFit {
            slope: 0.0,
            intercept: mean_y,
            r_squared: 0.0,
        };
    }

    let slope = numerator / denominator;
    let intercept = mean_y - slope * mean_x;

    let fitted: Vec<f64> = xs.iter().map(|&x| slope * x + intercept).collect();
    LinearFit {
        slope,
        intercept,
        r_squared: r_squared(ys, &fitted),
    }
}

/// Extend the last two smoothed values linearly by `day` steps.
///
/// A single smoothed value is carried forward unchanged; an empty input
/// yields 0.
pub fn extrapolate_smoothed(smoothed: &[f64], day: usize) -> f64 {
    match smoothed {
        [] => 0.0,
        [only] => *only,
        [.., prev, last] => last + (last - prev) * day as f64,
    }
}

/// Momentum estimate: the current price plus half the gap between the 7-day
/// moving average and the current price, scaled by the day offset
pub fn momentum_forecast(last_price: f64, ma_gap: f64, day: usize) -> f64 {
    last_price + ma_gap * 0.5 * day as f64
}
