//! Prediction methods behind the ensemble forecast: the regression-tree
//! ensemble and the analytic trend estimators

pub mod forest;
pub mod tree;
pub mod trend;

pub use forest::{RandomForest, DEFAULT_MAX_DEPTH, DEFAULT_TREES};
pub use tree::{DecisionNode, RegressionTree};
pub use trend::{extrapolate_smoothed, linear_regression, momentum_forecast, LinearFit};
