//! Assets and their daily price series

use crate::{PriceDataError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Category of a tradable asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    /// Foreign exchange currency
    #[serde(rename = "fx")]
    Currency,
    /// Precious metal
    Metal,
    /// Cryptocurrency
    Crypto,
}

/// A tradable instrument identified by a short code (e.g. USD, BTC, GOLD)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub code: String,
    pub label: String,
    pub category: AssetCategory,
}

impl Asset {
    pub fn new(code: &str, label: &str, category: AssetCategory) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
            category,
        }
    }
}

/// Provenance of a single price observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PriceSource {
    /// Central bank reference rate
    #[serde(rename = "bcm")]
    CentralBank,
    /// External market data API
    #[default]
    #[serde(rename = "api")]
    ExternalApi,
    /// Simulated observation
    #[serde(rename = "sim")]
    Simulated,
    /// Seeded initial data
    #[serde(rename = "init")]
    Seed,
}

/// One daily price observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
    #[serde(default)]
    pub source: PriceSource,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self {
            date,
            price,
            source: PriceSource::default(),
        }
    }

    pub fn with_source(date: NaiveDate, price: f64, source: PriceSource) -> Self {
        Self {
            date,
            price,
            source,
        }
    }
}

/// Ordered daily price history for one asset.
///
/// Dates are strictly increasing with no duplicates; the ingestion layer
/// guarantees this and the series does not re-validate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    asset: Asset,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a series from already-ordered observations
    pub fn new(asset: Asset, points: Vec<PricePoint>) -> Self {
        Self { asset, points }
    }

    /// Load a series from a CSV file with `date,price[,source]` columns
    pub fn from_csv<P: AsRef<Path>>(asset: Asset, path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut points = Vec::new();

        for record in reader.deserialize() {
            let point: PricePoint = record?;
            if !point.price.is_finite() || point.price < 0.0 {
                return Err(PriceDataError::InvalidRecord(format!(
                    "{} {}: price must be a finite non-negative number",
                    asset.code, point.date
                )));
            }
            points.push(point);
        }

        points.sort_by_key(|p| p.date);
        Ok(Self { asset, points })
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Prices in date order
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Observation dates in order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Price of the most recent observation
    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }

    /// The trailing `n` observations (all of them if fewer)
    pub fn tail(&self, n: usize) -> &[PricePoint] {
        &self.points[self.points.len().saturating_sub(n)..]
    }
}
