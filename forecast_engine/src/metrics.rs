//! Fit-quality metrics shared by the trend estimators and the orchestrator

/// Coefficient of determination between actual and predicted values.
///
/// `1 - SS_res / SS_tot`; returns 0 when SS_tot is 0 or when the inputs are
/// empty or of mismatched length.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() || actual.len() != predicted.len() {
        return 0.0;
    }

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(&a, &p)| (a - p).powi(2))
        .sum();
    let ss_tot: f64 = actual.iter().map(|&a| (a - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return 0.0;
    }
    1.0 - ss_res / ss_tot
}

/// Mean absolute error; 0 on empty or mismatched inputs
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() || actual.len() != predicted.len() {
        return 0.0;
    }

    actual
        .iter()
        .zip(predicted.iter())
        .map(|(&a, &p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Root mean squared error; 0 on empty or mismatched inputs
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() || actual.len() != predicted.len() {
        return 0.0;
    }

    let mse = actual
        .iter()
        .zip(predicted.iter())
        .map(|(&a, &p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64;
    mse.sqrt()
}
