use chrono::NaiveDate;
use forecast_engine::forecast::{ForecastConfig, Forecaster};
use price_data::{Asset, AssetCategory, InMemoryPriceStore, PricePoint, PriceStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Forecast Engine: Basic Forecasting Example");
    println!("==========================================\n");

    // Seed a store with 120 days of synthetic BTC prices: a gentle drift
    // plus Gaussian noise
    println!("Seeding sample data...");
    let mut store = InMemoryPriceStore::new();
    store.register(Asset::new("BTC", "Bitcoin", AssetCategory::Crypto));

    let start: NaiveDate = "2024-01-01".parse()?;
    let mut rng = StdRng::seed_from_u64(2024);
    let noise = Normal::new(0.0, 350.0)?;
    for i in 0..120 {
        let price = 60_000.0 + (i as f64) * 80.0 + noise.sample(&mut rng);
        let day = start + chrono::Duration::days(i);
        store.upsert("BTC", PricePoint::new(day, price))?;
    }
    println!("Sample data created: 120 daily points\n");

    // Fixed seed makes the bootstrap sampling reproducible between runs
    let forecaster = Forecaster::with_config(
        store,
        ForecastConfig {
            seed: Some(42),
            ..ForecastConfig::default()
        },
    );

    println!("Forecasting 7 days ahead...");
    let result = forecaster.forecast("BTC", 7)?;

    println!("\n{} ({})", result.asset_label, result.asset_code);
    println!("  Current price: {:.2}", result.current_price);
    println!(
        "  Window: avg {:.2}, min {:.2}, max {:.2}",
        result.average_price, result.min_price, result.max_price
    );
    println!(
        "  Volatility: {:.2} ({:.2}%)",
        result.volatility, result.volatility_percent
    );
    println!("  Trend: {}", result.trend);
    println!("  Signal: {}", result.signal);
    println!(
        "  Bollinger: {:.2} / {:.2} / {:.2}",
        result.bollinger.lower, result.bollinger.middle, result.bollinger.upper
    );
    println!(
        "  Quality: linear R² = {:.3}, forest R² = {:.3}",
        result.quality.linear_r_squared, result.quality.forest_r_squared
    );
    println!("  Confidence: {:?}\n", result.confidence);

    println!("Per-day predictions (blended | linear / exponential / momentum / forest):");
    for day in &result.predictions {
        let forest = day
            .forest
            .map(|f| format!("{:.2}", f))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {}: {:.2} | {:.2} / {:.2} / {:.2} / {}",
            day.date, day.value, day.linear, day.exponential, day.momentum, forest
        );
    }

    println!("\nForecasting complete!");
    Ok(())
}
