//! Metrics for evaluating forecast performance

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Multiplier of the legacy scaled mean difference
pub const LEGACY_SCORE_FACTOR: f64 = 0.09;

/// Forecast accuracy metrics, in the units of the series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, over non-zero actual values
    pub mape: f64,
    /// Largest absolute error
    pub max_abs_error: f64,
    /// `mean((actual - predicted) * 0.09)`, only when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_score: Option<f64>,
}

/// Score predictions against ground truth of the same length
pub fn score(actual: &[f64], predicted: &[f64]) -> Result<Metrics> {
    if actual.len() != predicted.len() {
        return Err(ForecastError::LengthMismatch {
            context: "actual and predicted series".to_string(),
            left: actual.len(),
            right: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(ForecastError::EmptyData(
            "Cannot score empty series".to_string(),
        ));
    }

    let n = actual.len() as f64;
    let errors: Vec<f64> = actual
        .iter()
        .zip(predicted.iter())
        .map(|(&a, &p)| a - p)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
    let max_abs_error = errors.iter().map(|e| e.abs()).fold(0.0, f64::max);

    let (pct_sum, pct_count) = actual
        .iter()
        .zip(errors.iter())
        .filter(|&(&a, _)| a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (&a, &e)| {
            (sum + (e.abs() / a.abs()) * 100.0, count + 1)
        });
    let mape = if pct_count > 0 {
        pct_sum / pct_count as f64
    } else {
        0.0
    };

    Ok(Metrics {
        mae,
        mse,
        rmse: mse.sqrt(),
        mape,
        max_abs_error,
        legacy_score: None,
    })
}

/// Score and also report the legacy scaled mean difference
pub fn score_with_legacy(actual: &[f64], predicted: &[f64]) -> Result<Metrics> {
    let mut metrics = score(actual, predicted)?;
    metrics.legacy_score = Some(legacy_score(actual, predicted)?);
    Ok(metrics)
}

/// Mean of the signed differences scaled by [`LEGACY_SCORE_FACTOR`].
///
/// Not a standard error measure; kept so reports can match older output.
pub fn legacy_score(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    if actual.len() != predicted.len() {
        return Err(ForecastError::LengthMismatch {
            context: "actual and predicted series".to_string(),
            left: actual.len(),
            right: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(ForecastError::EmptyData(
            "Cannot score empty series".to_string(),
        ));
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p) * LEGACY_SCORE_FACTOR)
        .sum();
    Ok(sum / actual.len() as f64)
}

impl std::fmt::Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Performance Metrics:")?;
        writeln!(f, "  MAE:     {:.4}", self.mae)?;
        writeln!(f, "  MSE:     {:.4}", self.mse)?;
        writeln!(f, "  RMSE:    {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:    {:.4}%", self.mape)?;
        writeln!(f, "  Max |e|: {:.4}", self.max_abs_error)?;
        if let Some(legacy) = self.legacy_score {
            writeln!(f, "  Legacy:  {:.4}", legacy)?;
        }
        Ok(())
    }
}
