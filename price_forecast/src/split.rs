//! Chronological train/test partitioning

use crate::error::{ForecastError, Result};

/// Number of observations in the training prefix: `floor(len * ratio)`
pub fn train_size(len: usize, ratio: f64) -> Result<usize> {
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "Train ratio must be strictly between 0 and 1, got {}",
            ratio
        )));
    }
    Ok((len as f64 * ratio).floor() as usize)
}

/// Split a series into a training prefix and a test suffix.
///
/// The split is purely positional; order is preserved and nothing is shuffled.
pub fn train_test_split(data: &[f64], ratio: f64) -> Result<(&[f64], &[f64])> {
    let split_at = train_size(data.len(), ratio)?;
    Ok(data.split_at(split_at))
}
