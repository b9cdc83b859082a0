//! Sliding lookback windows over a scaled partition
//!
//! A window pairs `lookback` consecutive values with the value that follows
//! them. Windows slide one position at a time, so a partition of length `n`
//! yields `n - lookback` windows, ordered by target position.

use crate::error::{ForecastError, Result};
use std::iter::FusedIterator;

/// One lookback window and the value that follows it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<'a> {
    /// `partition[i - lookback..i]`
    pub features: &'a [f64],
    /// `partition[i]`
    pub target: f64,
}

/// Builds lookback windows of a fixed length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBuilder {
    lookback: usize,
}

impl WindowBuilder {
    /// Create a builder for the given lookback length
    pub fn new(lookback: usize) -> Result<Self> {
        if lookback == 0 {
            return Err(ForecastError::InvalidParameter(
                "Lookback must be at least 1".to_string(),
            ));
        }
        Ok(Self { lookback })
    }

    /// Lookback length
    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// Number of windows a partition of `len` values yields
    pub fn window_count(&self, len: usize) -> usize {
        len.saturating_sub(self.lookback)
    }

    /// Lazily build the windows of a partition.
    ///
    /// `partition` names the partition in the error raised when it holds
    /// `lookback` values or fewer.
    pub fn build<'a>(&self, data: &'a [f64], partition: &str) -> Result<Windows<'a>> {
        if data.len() <= self.lookback {
            return Err(ForecastError::InsufficientData {
                partition: partition.to_string(),
                lookback: self.lookback,
                len: data.len(),
            });
        }

        Ok(Windows {
            data,
            lookback: self.lookback,
            next: self.lookback,
        })
    }
}

/// Lazy iterator over the windows of a partition.
///
/// Cloning restarts from the clone's position; a fresh `build` restarts from
/// the first window.
#[derive(Debug, Clone)]
pub struct Windows<'a> {
    data: &'a [f64],
    lookback: usize,
    next: usize,
}

impl<'a> Windows<'a> {
    /// Collect feature vectors and targets for fitting
    pub fn into_training_set(self) -> (Vec<Vec<f64>>, Vec<f64>) {
        self.map(|w| (w.features.to_vec(), w.target)).unzip()
    }

    /// Collect feature vectors only
    pub fn into_features(self) -> Vec<Vec<f64>> {
        self.map(|w| w.features.to_vec()).collect()
    }

    /// Collect targets only
    pub fn into_targets(self) -> Vec<f64> {
        self.map(|w| w.target).collect()
    }
}

impl<'a> Iterator for Windows<'a> {
    type Item = Window<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.data.len() {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(Window {
            features: &self.data[i - self.lookback..i],
            target: self.data[i],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Windows<'_> {}

impl FusedIterator for Windows<'_> {}
