//! Regression models for windowed forecasting
//!
//! A [`Regressor`] is an untrained, configured model. Fitting it on feature
//! windows produces a [`FittedRegressor`], which owns the learned state and
//! predicts one value per feature vector.

use crate::error::{ForecastError, Result};
use std::fmt::Debug;

/// Regressor fitted on windowed training data
pub trait FittedRegressor: Debug {
    /// Predict one value per feature vector, in input order
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>>;

    /// Feature vector length seen at fit time
    fn feature_len(&self) -> usize;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Regression model that can be fit on feature vectors and targets
pub trait Regressor: Debug {
    /// The type of fitted model produced
    type Fitted: FittedRegressor;

    /// Fit the model on feature vectors and their targets
    fn fit(&self, features: &[Vec<f64>], targets: &[f64]) -> Result<Self::Fitted>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Check a training set before fitting and return its feature length
pub fn validate_training_set(features: &[Vec<f64>], targets: &[f64]) -> Result<usize> {
    if features.is_empty() {
        return Err(ForecastError::Training(
            "Cannot fit on zero training windows".to_string(),
        ));
    }
    if features.len() != targets.len() {
        return Err(ForecastError::LengthMismatch {
            context: "training features and targets".to_string(),
            left: features.len(),
            right: targets.len(),
        });
    }

    let width = features[0].len();
    if width == 0 {
        return Err(ForecastError::Training(
            "Training feature vectors are empty".to_string(),
        ));
    }
    if let Some(row) = features.iter().position(|f| f.len() != width) {
        return Err(ForecastError::Training(format!(
            "Training row {} has {} features, expected {}",
            row,
            features[row].len(),
            width
        )));
    }
    if features.iter().flatten().chain(targets.iter()).any(|v| !v.is_finite()) {
        return Err(ForecastError::Training(
            "Training data contains non-finite values".to_string(),
        ));
    }

    Ok(width)
}

/// Check feature vectors against the fit-time width before predicting
pub fn validate_features(features: &[Vec<f64>], expected: usize) -> Result<()> {
    match features.iter().position(|f| f.len() != expected) {
        Some(row) => Err(ForecastError::Inference {
            expected,
            actual: features[row].len(),
            row,
        }),
        None => Ok(()),
    }
}

pub mod svr;
