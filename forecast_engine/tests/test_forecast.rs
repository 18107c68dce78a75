use chrono::NaiveDate;
use forecast_engine::error::ForecastError;
use forecast_engine::forecast::{ForecastConfig, Forecaster, Trend, TradingSignal};
use price_data::{Asset, AssetCategory, InMemoryPriceStore, PricePoint, PriceSeries, PriceStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn start_date() -> NaiveDate {
    "2024-01-01".parse().unwrap()
}

fn series_from(code: &str, prices: &[f64]) -> PriceSeries {
    let asset = Asset::new(code, code, AssetCategory::Crypto);
    let points = prices
        .iter()
        .enumerate()
        .map(|(i, &p)| PricePoint::new(start_date() + chrono::Duration::days(i as i64), p))
        .collect();
    PriceSeries::new(asset, points)
}

fn store_with(code: &str, prices: &[f64]) -> InMemoryPriceStore {
    let mut store = InMemoryPriceStore::new();
    store.seed(&series_from(code, prices)).unwrap();
    store
}

fn seeded_forecaster(store: InMemoryPriceStore) -> Forecaster<InMemoryPriceStore> {
    Forecaster::with_config(
        store,
        ForecastConfig {
            seed: Some(42),
            ..ForecastConfig::default()
        },
    )
}

/// 120-day monotonically increasing series: 100, 101, ..., 219
fn rising_prices() -> Vec<f64> {
    (0..120).map(|i| 100.0 + i as f64).collect()
}

#[test]
fn test_insufficient_data_is_a_value_not_a_crash() {
    let store = store_with("BTC", &[100.0; 10]);
    let forecaster = seeded_forecaster(store);

    match forecaster.forecast("BTC", 7) {
        Err(ForecastError::InsufficientData {
            required,
            available,
        }) => {
            assert_eq!(required, 20);
            assert_eq!(available, 10);
        }
        other => panic!("expected InsufficientData, got {:?}", other),
    }
}

#[test]
fn test_unknown_asset() {
    let store = store_with("BTC", &rising_prices());
    let forecaster = seeded_forecaster(store);

    assert!(matches!(
        forecaster.forecast("DOGE", 7),
        Err(ForecastError::AssetNotFound(_))
    ));
}

#[test]
fn test_unsupported_horizon() {
    let store = store_with("BTC", &rising_prices());
    let forecaster = seeded_forecaster(store);

    assert!(matches!(
        forecaster.forecast("BTC", 14),
        Err(ForecastError::UnsupportedHorizon(14))
    ));
}

#[test]
fn test_rising_series_end_to_end() {
    let store = store_with("BTC", &rising_prices());
    let forecaster = seeded_forecaster(store);

    let result = forecaster.forecast("BTC", 7).unwrap();

    assert_eq!(result.predictions.len(), 7);
    assert_eq!(result.trend, Trend::Bullish);
    assert_eq!(result.current_price, 219.0);
    assert_eq!(result.min_price, 100.0);
    assert_eq!(result.max_price, 219.0);

    // A pure uptrend pins RSI at 100 and flags it overbought
    assert_eq!(result.rsi, 100.0);
    assert_eq!(result.signal, TradingSignal::Overbought);

    // Blended values keep climbing day over day
    for pair in result.predictions.windows(2) {
        assert!(
            pair[1].value > pair[0].value,
            "expected strictly increasing predictions, got {} then {}",
            pair[0].value,
            pair[1].value
        );
    }

    // Perfect line: OLS quality is 1, forest had enough examples to train
    assert!((result.quality.linear_r_squared - 1.0).abs() < 1e-9);
    assert!(result.quality.forest_available);

    // Prediction dates continue the series from its last observation
    let last_date = start_date() + chrono::Duration::days(119);
    assert_eq!(
        result.predictions[0].date,
        last_date + chrono::Duration::days(1)
    );

    // Charting history is capped at the trailing 30 observations
    assert_eq!(result.history.len(), 30);
    assert_eq!(result.history.last().unwrap().price, 219.0);
}

#[test]
fn test_forest_only_contributes_on_the_first_week() {
    let store = store_with("BTC", &rising_prices());
    let forecaster = seeded_forecaster(store);

    let result = forecaster.forecast("BTC", 30).unwrap();
    assert_eq!(result.predictions.len(), 30);

    for day in &result.predictions[..7] {
        assert!(day.forest.is_some());
    }
    for day in &result.predictions[7..] {
        assert!(day.forest.is_none());
    }
}

#[test]
fn test_blended_values_stay_clamped() {
    // A violent spike invites runaway linear extrapolation
    let mut prices = vec![100.0; 100];
    prices.extend((0..20).map(|i| 100.0 + (i as f64) * 50.0));

    let store = store_with("BTC", &prices);
    let forecaster = seeded_forecaster(store);
    let result = forecaster.forecast("BTC", 30).unwrap();

    let lower = result.min_price * 0.7;
    let upper = result.max_price * 1.3;
    for day in &result.predictions {
        assert!(
            (lower..=upper).contains(&day.value),
            "day {} escaped the clamp range: {}",
            day.date,
            day.value
        );
    }
}

#[test]
fn test_seeded_forecasts_are_reproducible() {
    let first = seeded_forecaster(store_with("BTC", &rising_prices()))
        .forecast("BTC", 7)
        .unwrap();
    let second = seeded_forecaster(store_with("BTC", &rising_prices()))
        .forecast("BTC", 7)
        .unwrap();

    for (a, b) in first.predictions.iter().zip(second.predictions.iter()) {
        assert_eq!(a.value, b.value);
        assert_eq!(a.forest, b.forest);
    }
}

#[test]
fn test_noisy_series_produces_sane_result() {
    let mut rng = StdRng::seed_from_u64(7);
    let noise = Normal::new(0.0, 2.0).unwrap();
    let prices: Vec<f64> = (0..120)
        .map(|i| 500.0 + (i as f64) * 0.5 + noise.sample(&mut rng))
        .collect();

    let store = store_with("XAU", &prices);
    let forecaster = seeded_forecaster(store);
    let result = forecaster.forecast("XAU", 7).unwrap();

    assert!(result.volatility > 0.0);
    assert!(result.volatility_percent > 0.0);
    assert!((0.0..=100.0).contains(&result.rsi));
    for day in &result.predictions {
        assert!(day.value.is_finite());
    }
}

#[test]
fn test_flat_series_collapses_bands_onto_the_mean() {
    let store = store_with("USD", &[40.0; 25]);
    let forecaster = seeded_forecaster(store);
    let result = forecaster.forecast("USD", 7).unwrap();

    assert_eq!(result.bollinger.middle, 40.0);
    assert_eq!(result.bollinger.upper, 40.0);
    assert_eq!(result.bollinger.lower, 40.0);
    assert_eq!(result.trend, Trend::Neutral);
}

#[test]
fn test_bollinger_fallback_below_band_window() {
    // With a lowered minimum, a 15-point window forecasts fine but has too
    // little history for 20-day bands; the snapshot falls back to the
    // window mean with a 10% envelope.
    let store = store_with("USD", &[40.0; 15]);
    let forecaster = Forecaster::with_config(
        store,
        ForecastConfig {
            min_points: 10,
            seed: Some(42),
            ..ForecastConfig::default()
        },
    );

    let result = forecaster.forecast("USD", 7).unwrap();
    assert_eq!(result.bollinger.middle, 40.0);
    assert!((result.bollinger.upper - 44.0).abs() < 1e-9);
    assert!((result.bollinger.lower - 36.0).abs() < 1e-9);
}

#[test]
fn test_forecast_many_reports_per_asset_outcomes() {
    let mut store = InMemoryPriceStore::new();
    store.seed(&series_from("BTC", &rising_prices())).unwrap();
    store.seed(&series_from("USD", &[40.0; 5])).unwrap();

    let forecaster = seeded_forecaster(store);
    let results = forecaster.forecast_many(&["BTC", "USD", "EUR"], 7);

    assert!(results["BTC"].is_ok());
    assert!(matches!(
        &results["USD"],
        Err(ForecastError::InsufficientData { .. })
    ));
    assert!(matches!(
        &results["EUR"],
        Err(ForecastError::AssetNotFound(_))
    ));
}

#[test]
fn test_result_serializes_to_json() {
    let store = store_with("BTC", &rising_prices());
    let forecaster = seeded_forecaster(store);
    let result = forecaster.forecast("BTC", 7).unwrap();

    let json = result.to_json().unwrap();
    assert!(json.contains("\"asset_code\":\"BTC\""));
    assert!(json.contains("\"predictions\""));
}

#[test]
fn test_store_upsert_feeds_the_next_forecast() {
    let mut store = store_with("BTC", &rising_prices()[..20]);
    // Revise the latest observation upward before forecasting
    let last_day = start_date() + chrono::Duration::days(19);
    store
        .upsert("BTC", PricePoint::new(last_day, 500.0))
        .unwrap();

    let forecaster = seeded_forecaster(store);
    let result = forecaster.forecast("BTC", 7).unwrap();
    assert_eq!(result.current_price, 500.0);
}
