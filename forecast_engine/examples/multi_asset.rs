use chrono::NaiveDate;
use forecast_engine::forecast::{ForecastConfig, Forecaster};
use price_data::{Asset, AssetCategory, InMemoryPriceStore, PricePoint, PriceSeries};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Forecast Engine: Multi-Asset Example");
    println!("====================================\n");

    let mut store = InMemoryPriceStore::new();

    // A healthy currency series, a metal with a data gap, and an asset
    // that was never registered
    seed(
        &mut store,
        Asset::new("USD", "US Dollar", AssetCategory::Currency),
        120,
        |i| 39.0 + (i as f64) * 0.01,
    )?;
    seed(
        &mut store,
        Asset::new("XAU", "Gold", AssetCategory::Metal),
        8,
        |i| 2300.0 + (i as f64) * 1.5,
    )?;

    let forecaster = Forecaster::with_config(
        store,
        ForecastConfig {
            seed: Some(7),
            ..ForecastConfig::default()
        },
    );

    let results = forecaster.forecast_many(&["USD", "XAU", "ETH"], 7);
    for (code, outcome) in &results {
        match outcome {
            Ok(result) => println!(
                "{}: {} trend, next-day estimate {:.2}",
                code, result.trend, result.predictions[0].value
            ),
            // Missing assets and thin histories are normal outcomes, not
            // failures: report and move on
            Err(err) => println!("{}: skipped ({})", code, err),
        }
    }

    Ok(())
}

fn seed(
    store: &mut InMemoryPriceStore,
    asset: Asset,
    days: usize,
    price_at: impl Fn(usize) -> f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let start: NaiveDate = "2024-01-01".parse()?;
    let points = (0..days)
        .map(|i| PricePoint::new(start + chrono::Duration::days(i as i64), price_at(i)))
        .collect();
    store.seed(&PriceSeries::new(asset, points))?;
    Ok(())
}
