//! Price storage abstraction and in-memory reference implementation

use crate::series::{Asset, PricePoint, PriceSeries};
use crate::{PriceDataError, Result};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Read/write access to per-asset daily price records.
///
/// The forecasting engine only calls [`PriceStore::load_recent`]; the write
/// side exists for the ingestion layer and for seeding test fixtures.
pub trait PriceStore {
    /// Load the trailing `days`-day window of an asset's history, measured
    /// back from its most recent observation, in ascending date order.
    fn load_recent(&self, code: &str, days: u32) -> Result<PriceSeries>;

    /// The most recent observation for an asset
    fn latest(&self, code: &str) -> Result<PricePoint>;

    /// Insert or replace the observation for `(code, point.date)`
    fn upsert(&mut self, code: &str, point: PricePoint) -> Result<()>;
}

/// In-memory price store backed by per-asset date-ordered maps
#[derive(Debug, Default)]
pub struct InMemoryPriceStore {
    assets: HashMap<String, Asset>,
    prices: HashMap<String, BTreeMap<NaiveDate, PricePoint>>,
}

impl InMemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset so its prices can be stored and queried
    pub fn register(&mut self, asset: Asset) {
        self.prices.entry(asset.code.clone()).or_default();
        self.assets.insert(asset.code.clone(), asset);
    }

    /// Register an asset and load a whole series in one step
    pub fn seed(&mut self, series: &PriceSeries) -> Result<()> {
        self.register(series.asset().clone());
        for point in series.points() {
            self.upsert(&series.asset().code, *point)?;
        }
        Ok(())
    }

    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    fn asset(&self, code: &str) -> Result<&Asset> {
        self.assets
            .get(code)
            .ok_or_else(|| PriceDataError::AssetNotFound(code.to_string()))
    }
}

impl PriceStore for InMemoryPriceStore {
    fn load_recent(&self, code: &str, days: u32) -> Result<PriceSeries> {
        let asset = self.asset(code)?;
        let points = &self.prices[code];

        let selected = match points.keys().next_back() {
            Some(&latest) => {
                let cutoff = latest - Duration::days(i64::from(days) - 1);
                points.range(cutoff..).map(|(_, p)| *p).collect()
            }
            None => Vec::new(),
        };

        debug!(code, days, count = selected.len(), "loaded recent prices");
        Ok(PriceSeries::new(asset.clone(), selected))
    }

    fn latest(&self, code: &str) -> Result<PricePoint> {
        self.asset(code)?;
        self.prices[code]
            .values()
            .next_back()
            .copied()
            .ok_or_else(|| {
                PriceDataError::InsufficientData(format!("no observations for {}", code))
            })
    }

    fn upsert(&mut self, code: &str, point: PricePoint) -> Result<()> {
        if !self.assets.contains_key(code) {
            return Err(PriceDataError::AssetNotFound(code.to_string()));
        }

        let replaced = self
            .prices
            .get_mut(code)
            .and_then(|points| points.insert(point.date, point))
            .is_some();
        debug!(code, date = %point.date, price = point.price, replaced, "upserted price");
        Ok(())
    }
}
