//! Synthetic price series for demos and tests

use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::path::Path;

/// Evenly stepped series `start, start + step, ...`
pub fn linear_series(len: usize, start: f64, step: f64) -> Vec<f64> {
    (0..len).map(|i| start + step * i as f64).collect()
}

/// Geometric random walk with per-step drift and volatility, reproducible by seed
pub fn random_walk(len: usize, start: f64, drift: f64, volatility: f64, seed: u64) -> Result<Vec<f64>> {
    if !(start > 0.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "Starting price must be positive, got {}",
            start
        )));
    }
    let normal = Normal::new(drift, volatility).map_err(|e| {
        ForecastError::InvalidParameter(format!("Invalid volatility {}: {}", volatility, e))
    })?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = start;
    let mut prices = Vec::with_capacity(len);
    for _ in 0..len {
        prices.push(price);
        price *= normal.sample(&mut rng).exp();
    }

    Ok(prices)
}

/// Write prices as a `Date,Close` file with consecutive daily dates
pub fn write_csv<P: AsRef<Path>>(path: P, prices: &[f64]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Date", "Close"])?;

    let start = NaiveDate::from_ymd_opt(2020, 1, 1)
        .ok_or_else(|| ForecastError::InvalidParameter("Invalid start date".to_string()))?;
    for (i, price) in prices.iter().enumerate() {
        let date = start
            .checked_add_days(Days::new(i as u64))
            .ok_or_else(|| ForecastError::InvalidParameter("Date out of range".to_string()))?;
        writer.write_record([date.format("%Y-%m-%d").to_string(), price.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}
