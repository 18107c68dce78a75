//! # Forecast Engine
//!
//! Short-horizon price forecasting for daily asset series.
//!
//! ## Features
//!
//! - Technical indicators (RSI, Bollinger Bands, moving averages,
//!   exponential smoothing)
//! - Four independent prediction methods: trend regression, exponential
//!   smoothing, momentum, and a from-scratch bootstrap forest of
//!   regression trees
//! - Confidence-weighted blending that adapts to each method's fit quality
//! - Pure computation over a [`price_data::PriceStore`]: no I/O beyond the
//!   single series load, no state shared between calls
//!
//! ## Quick Start
//!
//! ```no_run
//! use forecast_engine::forecast::{ForecastConfig, Forecaster};
//! use price_data::InMemoryPriceStore;
//!
//! # fn main() -> forecast_engine::Result<()> {
//! let mut store = InMemoryPriceStore::new();
//! // ... register assets and upsert daily prices ...
//!
//! let forecaster = Forecaster::with_config(
//!     store,
//!     ForecastConfig {
//!         seed: Some(42), // reproducible bootstrap sampling
//!         ..ForecastConfig::default()
//!     },
//! );
//!
//! let result = forecaster.forecast("BTC", 7)?;
//! for day in &result.predictions {
//!     println!("{}: {:.2}", day.date, day.value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod features;
pub mod forecast;
pub mod indicators;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use crate::error::{ForecastError, Result};
pub use crate::forecast::{
    ForecastConfig, ForecastResult, Forecaster, PredictionDay, Trend, TradingSignal,
};
pub use crate::indicators::BollingerBands;
pub use crate::models::{RandomForest, RegressionTree};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
