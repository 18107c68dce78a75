//! Error types for the forecast_engine crate

use price_data::PriceDataError;
use thiserror::Error;

/// Custom error types for the forecast_engine crate.
///
/// `InsufficientData` and `AssetNotFound` describe normal operational states
/// (a newly added asset, a data gap) and are returned as values; nothing in
/// the engine panics for them. Numeric degeneracies inside the engine never
/// surface here at all; each has a documented fallback value.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Not enough history in the load window to forecast
    #[error("Insufficient data: need at least {required} prices, have {available}")]
    InsufficientData { required: usize, available: usize },

    /// Asset identifier has no known series
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// Requested horizon is not one of the supported values
    #[error("Unsupported horizon: {0} days")]
    UnsupportedHorizon(usize),

    /// Error reported by the price storage collaborator
    #[error("Data error: {0}")]
    DataError(String),
}

impl From<PriceDataError> for ForecastError {
    fn from(err: PriceDataError) -> Self {
        match err {
            PriceDataError::AssetNotFound(code) => ForecastError::AssetNotFound(code),
            other => ForecastError::DataError(other.to_string()),
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
