//! # pricecast
//!
//! Workspace facade re-exporting the two member crates: daily asset price
//! data handling and the ensemble forecasting engine.
//!
//! ## Example
//!
//! ```no_run
//! use pricecast_workspace::forecast_engine::forecast::Forecaster;
//! use pricecast_workspace::price_data::InMemoryPriceStore;
//!
//! let store = InMemoryPriceStore::new();
//! let forecaster = Forecaster::new(store);
//! let outcome = forecaster.forecast("BTC", 7);
//! ```

pub use forecast_engine;
pub use price_data;
