//! Min-max scaling
//!
//! Maps a value range onto `[0, 1]` with an affine transform that can be
//! reversed exactly given the fitted minimum and maximum.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Reversible min-max scaler fit on a single series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// Fit the scaler on a series, recording its minimum and maximum
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(MathError::InsufficientData(
                "Cannot fit a scaler on an empty series".to_string(),
            ));
        }

        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(format!(
                "Cannot fit a scaler on non-finite value {}",
                bad
            )));
        }

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        if max == min {
            return Err(MathError::DegenerateRange(min));
        }

        Ok(Self { min, max })
    }

    /// Rebuild a scaler from known parameters
    pub fn from_params(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(MathError::InvalidInput(format!(
                "Scaler bounds must be finite, got min={} max={}",
                min, max
            )));
        }
        if max == min {
            return Err(MathError::DegenerateRange(min));
        }
        if max < min {
            return Err(MathError::InvalidInput(format!(
                "Scaler max ({}) is below min ({})",
                max, min
            )));
        }

        Ok(Self { min, max })
    }

    /// Minimum seen at fit time
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Maximum seen at fit time
    pub fn max(&self) -> f64 {
        self.max
    }

    fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Scale a single value
    pub fn scale_value(&self, value: f64) -> f64 {
        (value - self.min) / self.range()
    }

    /// Map a single scaled value back to original units
    pub fn unscale_value(&self, scaled: f64) -> f64 {
        scaled * self.range() + self.min
    }

    /// Scale every value of a series.
    ///
    /// Values outside the fitted range map outside `[0, 1]`; they are not clipped.
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.scale_value(v)).collect()
    }

    /// Map scaled values back to original units
    pub fn inverse(&self, scaled: &[f64]) -> Vec<f64> {
        scaled.iter().map(|&s| self.unscale_value(s)).collect()
    }
}
