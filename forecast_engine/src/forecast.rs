//! Forecast orchestration: blends the four prediction methods over a
//! recent price window into per-day forecasts with indicator context

use crate::error::{ForecastError, Result};
use crate::features::{build_features, normalize_window, DEFAULT_FEATURE_WINDOW};
use crate::indicators::{
    bollinger_bands, exponential_smoothing, moving_average, relative_strength_index,
    BollingerBands, DEFAULT_ALPHA, DEFAULT_BOLLINGER_STD, DEFAULT_BOLLINGER_WINDOW,
    DEFAULT_RSI_PERIOD,
};
use crate::metrics::{mean_absolute_error, r_squared};
use crate::models::forest::{RandomForest, DEFAULT_MAX_DEPTH, DEFAULT_TREES};
use crate::models::trend::{extrapolate_smoothed, linear_regression, momentum_forecast};
use chrono::{Duration, NaiveDate};
use price_data::{PricePoint, PriceStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

/// Forecast horizons the engine accepts, in days
pub const SUPPORTED_HORIZONS: [usize; 2] = [7, 30];
/// Days of history loaded per forecast
pub const DEFAULT_HISTORY_DAYS: u32 = 120;
/// Minimum observations required to forecast at all
pub const DEFAULT_MIN_POINTS: usize = 20;
/// Forest predictions are only trusted this many days out
const FOREST_HORIZON_LIMIT: usize = 7;
/// Blended values are clamped to [0.7 * window min, 1.3 * window max]
const CLAMP_LOWER_RATIO: f64 = 0.7;
const CLAMP_UPPER_RATIO: f64 = 1.3;

/// Tunable parameters for one forecaster instance
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    /// Days of history to load from the store
    pub history_days: u32,
    /// Minimum observations below which the forecast is refused
    pub min_points: usize,
    /// Sliding window of prices per training feature vector
    pub feature_window: usize,
    /// Trees in the bootstrap ensemble
    pub n_trees: usize,
    /// Depth bound per tree
    pub max_depth: usize,
    /// Fixed seed for bootstrap sampling; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            history_days: DEFAULT_HISTORY_DAYS,
            min_points: DEFAULT_MIN_POINTS,
            feature_window: DEFAULT_FEATURE_WINDOW,
            n_trees: DEFAULT_TREES,
            max_depth: DEFAULT_MAX_DEPTH,
            seed: None,
        }
    }
}

/// Overall direction of the recent window relative to its own average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bullish => write!(f, "bullish"),
            Trend::Bearish => write!(f, "bearish"),
            Trend::Neutral => write!(f, "neutral"),
        }
    }
}

/// Trading signal derived from the RSI oscillator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingSignal {
    /// RSI above 70
    Overbought,
    /// RSI below 30
    Oversold,
    /// Neither, carrying the RSI reading
    Neutral { rsi: f64 },
}

impl fmt::Display for TradingSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradingSignal::Overbought => write!(f, "overbought (RSI > 70)"),
            TradingSignal::Oversold => write!(f, "oversold (RSI < 30)"),
            TradingSignal::Neutral { rsi } => write!(f, "neutral (RSI = {:.1})", rsi),
        }
    }
}

/// Which method the quality metrics favour for this window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BestModel {
    Forest,
    Linear,
    Ensemble,
}

/// Coarse confidence classification from the favoured method's R²
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// One forecasted day: the blended value plus each method's raw estimate
#[derive(Debug, Clone, Serialize)]
pub struct PredictionDay {
    pub date: NaiveDate,
    pub value: f64,
    pub linear: f64,
    pub exponential: f64,
    pub momentum: f64,
    pub forest: Option<f64>,
}

/// Fit quality of the two methods that carry an R² score
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelQuality {
    pub linear_r_squared: f64,
    pub forest_r_squared: f64,
    pub forest_available: bool,
}

/// The engine's sole output: per-day predictions with window statistics,
/// indicator context, and quality metrics. Read-only after construction.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    pub asset_code: String,
    pub asset_label: String,
    pub current_price: f64,
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub volatility: f64,
    pub volatility_percent: f64,
    pub trend: Trend,
    pub rsi: f64,
    pub signal: TradingSignal,
    pub bollinger: BollingerBands,
    pub quality: ModelQuality,
    pub best_model: BestModel,
    pub confidence: ConfidenceLevel,
    pub predictions: Vec<PredictionDay>,
    /// Trailing (date, price) observations for charting
    pub history: Vec<PricePoint>,
}

impl ForecastResult {
    /// Serialize for a JSON adapter surface
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ForecastError::DataError(e.to_string()))
    }
}

/// Blend weights for the methods present, renormalized to sum to 1.
///
/// With a forest estimate: [linear, exponential, momentum, forest] =
/// [max(0.2, R²_lin·0.4), 0.25, 0.2, max(0.15, R²_rf·0.4)]. Without:
/// [max(0.3, R²_lin), 0.25, 1 − w_lin − w_exp]; the momentum weight can go
/// negative before renormalization when R²_lin is high, and is deliberately
/// left unclamped to match the established blend output.
pub fn ensemble_weights(linear_r_squared: f64, forest_r_squared: Option<f64>) -> Vec<f64> {
    let raw = match forest_r_squared {
        Some(rf) => vec![
            (linear_r_squared * 0.4).max(0.2),
            0.25,
            0.2,
            (rf * 0.4).max(0.15),
        ],
        None => {
            let w_linear = linear_r_squared.max(0.3);
            let w_exponential = 0.25;
            let w_momentum = 1.0 - w_linear - w_exponential;
            vec![w_linear, w_exponential, w_momentum]
        }
    };

    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

/// Compare the last 7 prices to the whole window: more than 1% above the
/// window mean is bullish, more than 1% below is bearish
pub fn classify_trend(values: &[f64]) -> Trend {
    if values.is_empty() {
        return Trend::Neutral;
    }

    let average = values.iter().sum::<f64>() / values.len() as f64;
    let tail = &values[values.len().saturating_sub(7)..];
    let recent = tail.iter().sum::<f64>() / tail.len() as f64;

    if recent > average * 1.01 {
        Trend::Bullish
    } else if recent < average * 0.99 {
        Trend::Bearish
    } else {
        Trend::Neutral
    }
}

/// RSI above 70 is overbought, below 30 oversold, otherwise neutral
pub fn classify_signal(rsi: f64) -> TradingSignal {
    if rsi > 70.0 {
        TradingSignal::Overbought
    } else if rsi < 30.0 {
        TradingSignal::Oversold
    } else {
        TradingSignal::Neutral { rsi }
    }
}

/// Forecasting engine over a price store.
///
/// Every call is self-contained: features, forest, and indicators are
/// rebuilt from the freshly loaded window, so concurrent calls for
/// different assets are fully independent.
#[derive(Debug)]
pub struct Forecaster<S: PriceStore> {
    store: S,
    config: ForecastConfig,
}

impl<S: PriceStore> Forecaster<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, ForecastConfig::default())
    }

    pub fn with_config(store: S, config: ForecastConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Forecast `horizon` days ahead for one asset.
    ///
    /// `InsufficientData` and `AssetNotFound` are expected operational
    /// outcomes, not failures of the engine.
    pub fn forecast(&self, code: &str, horizon: usize) -> Result<ForecastResult> {
        if !SUPPORTED_HORIZONS.contains(&horizon) {
            return Err(ForecastError::UnsupportedHorizon(horizon));
        }

        let series = self.store.load_recent(code, self.config.history_days)?;
        if series.len() < self.config.min_points {
            return Err(ForecastError::InsufficientData {
                required: self.config.min_points,
                available: series.len(),
            });
        }

        let values = series.prices();
        let last_price = values[values.len() - 1];
        let last_date = series.points()[series.len() - 1].date;
        debug!(code, points = values.len(), horizon, "loaded forecast window");

        // Method 1: linear regression on (index, price)
        let xs: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
        let fit = linear_regression(&xs, &values);

        // Method 2: exponential smoothing of the whole window
        let smoothed = exponential_smoothing(&values, DEFAULT_ALPHA);

        // Method 3: momentum baseline from the 7-day moving average gap
        let ma7 = moving_average(&values, 7);
        let recent_ma = ma7.last().copied().unwrap_or(last_price);
        let ma_gap = recent_ma - last_price;

        // Method 4: bootstrap forest over engineered features
        let examples = build_features(&values, self.config.feature_window);
        let (forest, forest_r_squared) = if examples.len() > 2 {
            let mut rng = match self.config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let forest =
                RandomForest::fit(&examples, self.config.n_trees, self.config.max_depth, &mut rng);

            // Fit quality on the trailing 10 training examples
            let tail = &examples[examples.len().saturating_sub(10)..];
            let actual: Vec<f64> = tail.iter().map(|e| e.target).collect();
            let predicted: Vec<f64> = tail.iter().map(|e| forest.predict(&e.features)).collect();
            let r2 = r_squared(&actual, &predicted);
            debug!(
                r_squared = r2,
                holdout_mae = mean_absolute_error(&actual, &predicted),
                "evaluated forest on trailing examples"
            );
            (Some(forest), r2)
        } else {
            debug!(examples = examples.len(), "too few examples, forest unavailable");
            (None, 0.0)
        };

        let rsi = relative_strength_index(&values, DEFAULT_RSI_PERIOD);
        let bands = bollinger_bands(&values, DEFAULT_BOLLINGER_WINDOW, DEFAULT_BOLLINGER_STD);

        let min_price = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max_price = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let clamp_lower = min_price * CLAMP_LOWER_RATIO;
        let clamp_upper = max_price * CLAMP_UPPER_RATIO;

        let mut predictions = Vec::with_capacity(horizon);
        for day in 1..=horizon {
            let linear = fit.value_at((values.len() + day - 1) as f64);
            let exponential = extrapolate_smoothed(&smoothed, day);
            let momentum = momentum_forecast(last_price, ma_gap, day);

            let forest_value = match &forest {
                Some(forest) if day <= FOREST_HORIZON_LIMIT => Some(forest.predict(
                    &recent_feature_vector(
                        &values,
                        self.config.feature_window,
                        rsi,
                        ma_gap,
                        last_price,
                    ),
                )),
                _ => None,
            };

            let methods: Vec<f64> = match forest_value {
                Some(f) => vec![linear, exponential, momentum, f],
                None => vec![linear, exponential, momentum],
            };
            let weights =
                ensemble_weights(fit.r_squared, forest_value.map(|_| forest_r_squared));
            let blended: f64 = methods.iter().zip(&weights).map(|(m, w)| m * w).sum();

            predictions.push(PredictionDay {
                date: last_date + Duration::days(day as i64),
                value: blended.max(clamp_lower).min(clamp_upper),
                linear,
                exponential,
                momentum,
                forest: forest_value,
            });
        }

        let average_price = values.iter().sum::<f64>() / values.len() as f64;
        let volatility = sample_std_dev(&values);
        let volatility_percent = if average_price != 0.0 {
            volatility / average_price * 100.0
        } else {
            0.0
        };

        let forest_available = forest.is_some();
        let best_model = if forest_available && forest_r_squared > 0.5 {
            BestModel::Forest
        } else if fit.r_squared > 0.5 {
            BestModel::Linear
        } else {
            BestModel::Ensemble
        };
        let confidence = confidence_level(if forest_available {
            forest_r_squared
        } else {
            fit.r_squared
        });

        let result = ForecastResult {
            asset_code: series.asset().code.clone(),
            asset_label: series.asset().label.clone(),
            current_price: last_price,
            average_price,
            min_price,
            max_price,
            volatility,
            volatility_percent,
            trend: classify_trend(&values),
            rsi,
            signal: classify_signal(rsi),
            bollinger: bands.unwrap_or(BollingerBands {
                middle: average_price,
                upper: average_price * 1.1,
                lower: average_price * 0.9,
            }),
            quality: ModelQuality {
                linear_r_squared: fit.r_squared,
                forest_r_squared,
                forest_available,
            },
            best_model,
            confidence,
            predictions,
            history: series.tail(30).to_vec(),
        };

        info!(
            code,
            horizon,
            trend = %result.trend,
            confidence = ?result.confidence,
            "forecast complete"
        );
        Ok(result)
    }

    /// Forecast several assets in one call; each entry carries its own
    /// outcome so one missing asset does not mask the others
    pub fn forecast_many(
        &self,
        codes: &[&str],
        horizon: usize,
    ) -> HashMap<String, Result<ForecastResult>> {
        codes
            .iter()
            .map(|&code| (code.to_string(), self.forecast(code, horizon)))
            .collect()
    }
}

/// Feature vector for predicting from the live tail of the series: the
/// trailing window of prices normalized, then RSI/100 and the MA-gap ratio
fn recent_feature_vector(
    values: &[f64],
    window: usize,
    rsi: f64,
    ma_gap: f64,
    last_price: f64,
) -> Vec<f64> {
    let mut features = normalize_window(&values[values.len().saturating_sub(window)..]);
    features.push(rsi / 100.0);
    features.push(if last_price != 0.0 {
        ma_gap / last_price
    } else {
        0.0
    });
    features
}

/// Sample standard deviation, 0 for fewer than two values
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

fn confidence_level(r_squared: f64) -> ConfidenceLevel {
    if r_squared > 0.7 {
        ConfidenceLevel::High
    } else if r_squared > 0.4 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}
