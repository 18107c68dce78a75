// Walks the whole pipeline: seed a store, inspect the series, forecast
// two horizons, and compare assets side by side.
use chrono::NaiveDate;
use pricecast_workspace::forecast_engine::forecast::{ForecastConfig, Forecaster};
use pricecast_workspace::price_data::{
    compare_assets, price_change, Asset, AssetCategory, InMemoryPriceStore, PricePoint,
    PriceSeries,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("pricecast: Forecast Overview");
    println!("============================\n");

    let start: NaiveDate = "2024-01-01".parse()?;
    let mut store = InMemoryPriceStore::new();
    let usd = build_series(start, "USD", "US Dollar", AssetCategory::Currency, |i| {
        39.0 + (i as f64) * 0.015 + ((i % 5) as f64) * 0.04
    });
    let btc = build_series(start, "BTC", "Bitcoin", AssetCategory::Crypto, |i| {
        58_000.0 + (i as f64) * 120.0 - ((i % 7) as f64) * 200.0
    });
    store.seed(&usd)?;
    store.seed(&btc)?;

    println!("=== Series Analysis ===");
    let change = price_change(&btc, 7)?;
    println!(
        "BTC over {} days: {:+.2} ({:+.2}%)",
        change.period_days, change.change, change.change_percent
    );
    for entry in compare_assets(&[usd, btc], 30) {
        println!(
            "{}: min {:.2}, max {:.2}, avg {:.2}",
            entry.code, entry.min_price, entry.max_price, entry.average_price
        );
    }

    println!("\n=== Forecasts ===");
    let forecaster = Forecaster::with_config(
        store,
        ForecastConfig {
            seed: Some(1),
            ..ForecastConfig::default()
        },
    );
    for horizon in [7, 30] {
        let result = forecaster.forecast("BTC", horizon)?;
        let last = result.predictions.last().map(|d| d.value).unwrap_or(0.0);
        println!(
            "BTC {}-day: trend {}, day-{} estimate {:.0} (confidence {:?})",
            horizon,
            result.trend,
            horizon,
            last,
            result.confidence
        );
    }

    println!("\nDone");
    Ok(())
}

fn build_series(
    start: NaiveDate,
    code: &str,
    label: &str,
    category: AssetCategory,
    price_at: impl Fn(usize) -> f64,
) -> PriceSeries {
    let points = (0..120)
        .map(|i| PricePoint::new(start + chrono::Duration::days(i as i64), price_at(i)))
        .collect();
    PriceSeries::new(Asset::new(code, label, category), points)
}
