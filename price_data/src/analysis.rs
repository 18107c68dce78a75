//! Series-level analysis helpers: windowed price change, multi-asset
//! comparison, percentage variation

use crate::series::PriceSeries;
use crate::{PriceDataError, Result};
use serde::Serialize;

/// Price movement over a trailing window
#[derive(Debug, Clone, Serialize)]
pub struct PriceChange {
    pub period_days: usize,
    pub initial_price: f64,
    pub final_price: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// Per-asset summary over a common trailing window
#[derive(Debug, Clone, Serialize)]
pub struct AssetComparison {
    pub code: String,
    pub label: String,
    pub min_price: f64,
    pub max_price: f64,
    pub average_price: f64,
}

/// Compute the price change over the trailing `days` observations.
///
/// Needs at least two observations in the window.
pub fn price_change(series: &PriceSeries, days: usize) -> Result<PriceChange> {
    let window = series.tail(days);
    if window.len() < 2 {
        return Err(PriceDataError::InsufficientData(format!(
            "need at least 2 observations for {}, have {}",
            series.asset().code,
            window.len()
        )));
    }

    let initial = window[0].price;
    let last = window[window.len() - 1].price;
    let change = last - initial;
    let change_percent = if initial != 0.0 {
        change / initial * 100.0
    } else {
        0.0
    };

    Ok(PriceChange {
        period_days: days,
        initial_price: initial,
        final_price: last,
        change,
        change_percent,
    })
}

/// Summarize several assets over the same trailing window.
///
/// Series with no observations in the window are skipped.
pub fn compare_assets(series: &[PriceSeries], days: usize) -> Vec<AssetComparison> {
    series
        .iter()
        .filter_map(|s| {
            let window = s.tail(days);
            if window.is_empty() {
                return None;
            }

            let prices: Vec<f64> = window.iter().map(|p| p.price).collect();
            let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
            let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let average = prices.iter().sum::<f64>() / prices.len() as f64;

            Some(AssetComparison {
                code: s.asset().code.clone(),
                label: s.asset().label.clone(),
                min_price: min,
                max_price: max,
                average_price: average,
            })
        })
        .collect()
}

/// Percentage variation between two prices; 0 when the previous price is 0
pub fn variation(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}
