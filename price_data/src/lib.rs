//! # Price Data
//!
//! Domain types for daily asset prices: the assets themselves (currencies,
//! metals, crypto), their ordered price series, a storage abstraction with an
//! in-memory reference implementation, and series-level analysis helpers.
//!
//! The forecasting engine consumes these types through the [`PriceStore`]
//! trait and never touches a concrete storage backend.

use thiserror::Error;

pub mod analysis;
pub mod series;
pub mod store;

pub use crate::analysis::{compare_assets, price_change, variation, AssetComparison, PriceChange};
pub use crate::series::{Asset, AssetCategory, PricePoint, PriceSeries, PriceSource};
pub use crate::store::{InMemoryPriceStore, PriceStore};

/// Errors that can occur in price data handling
#[derive(Error, Debug)]
pub enum PriceDataError {
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type for price data operations
pub type Result<T> = std::result::Result<T, PriceDataError>;
