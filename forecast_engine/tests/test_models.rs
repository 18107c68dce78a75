use assert_approx_eq::assert_approx_eq;
use forecast_engine::features::build_features;
use forecast_engine::models::forest::RandomForest;
use forecast_engine::models::tree::RegressionTree;
use forecast_engine::models::trend::linear_regression;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Features built from a real price ramp, fed through a single tree
#[test]
fn test_tree_on_engineered_features() {
    let prices: Vec<f64> = (0..60).map(|i| 200.0 + i as f64 * 2.0).collect();
    let examples = build_features(&prices, 7);
    assert!(examples.len() > 40);

    let tree = RegressionTree::fit(&examples, 5);

    // Predicting on a training vector lands inside the target range
    let probe = &examples[examples.len() / 2];
    let prediction = tree.predict(&probe.features);
    let min_target = examples.iter().map(|e| e.target).fold(f64::INFINITY, f64::min);
    let max_target = examples
        .iter()
        .map(|e| e.target)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!((min_target..=max_target).contains(&prediction));
}

#[test]
fn test_forest_averages_toward_recent_targets() {
    let prices: Vec<f64> = (0..60).map(|i| 200.0 + i as f64 * 2.0).collect();
    let examples = build_features(&prices, 7);

    let mut rng = StdRng::seed_from_u64(5);
    let forest = RandomForest::fit(&examples, 10, 5, &mut rng);

    // The live tail features sit at the top of the training distribution,
    // so the ensemble should answer with a high-end target.
    let last = examples.last().unwrap();
    let prediction = forest.predict(&last.features);
    assert!(
        prediction > 250.0,
        "expected a high-end prediction, got {}",
        prediction
    );
}

#[test]
fn test_regression_matches_known_line() {
    let xs: Vec<f64> = (0..120).map(|i| i as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x + 17.0).collect();

    let fit = linear_regression(&xs, &ys);
    assert_approx_eq!(fit.slope, 3.0);
    assert_approx_eq!(fit.intercept, 17.0);
    assert_approx_eq!(fit.r_squared, 1.0);

    // Extrapolation continues the line
    assert_approx_eq!(fit.value_at(150.0), 467.0);
}
