//! End-to-end windowed forecasting pipeline
//!
//! Load → scale → split → window → fit → predict → inverse-scale → score.
//! Each stage runs to completion before the next starts, and the first
//! failing stage aborts the run with its error; no partial report is built.

use crate::config::{GroundTruth, PipelineConfig, ScalerFit};
use crate::data::{PriceSeries, SeriesLoader};
use crate::error::Result;
use crate::metrics::{self, Metrics};
use crate::models::svr::SupportVectorRegressor;
use crate::models::{FittedRegressor, Regressor};
use crate::split;
use crate::window::WindowBuilder;
use chrono::NaiveDate;
use forecast_math::scaling::MinMaxScaler;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, info_span};

/// Outcome of one pipeline run, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    /// Ground truth in price units, `raw[train_size + lookback..]`
    pub actual: Vec<f64>,
    /// Predictions in price units, index-aligned with `actual`
    pub predicted: Vec<f64>,
    /// Dates of the scored rows, when the input had them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<Vec<NaiveDate>>,
    pub metrics: Metrics,
    /// Length of the training partition
    pub train_size: usize,
    /// Length of the test partition
    pub test_size: usize,
    pub lookback: usize,
    pub train_windows: usize,
    pub test_windows: usize,
    /// Model description
    pub model: String,
    /// Scaler bounds used in both directions
    pub scaler_min: f64,
    pub scaler_max: f64,
}

impl ForecastReport {
    /// Number of scored points
    pub fn len(&self) -> usize {
        self.actual.len()
    }

    /// True when nothing was scored
    pub fn is_empty(&self) -> bool {
        self.actual.is_empty()
    }

    /// `(date, actual, predicted)` rows for export
    pub fn rows(&self) -> impl Iterator<Item = (Option<NaiveDate>, f64, f64)> + '_ {
        self.actual
            .iter()
            .zip(self.predicted.iter())
            .enumerate()
            .map(move |(i, (&a, &p))| (self.dates.as_ref().map(|d| d[i]), a, p))
    }
}

/// Windowed regression forecasting pipeline
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with a validated configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load a price file and run the configured support vector regressor on it
    pub fn run<P: AsRef<Path>>(&self, path: P) -> Result<ForecastReport> {
        let series = SeriesLoader::from_csv(path, &self.config.loader)?;
        self.run_series(&series)
    }

    /// Run the configured support vector regressor on an in-memory series
    pub fn run_series(&self, series: &PriceSeries) -> Result<ForecastReport> {
        let regressor = SupportVectorRegressor::new(&self.config.regressor)?;
        self.run_with(&regressor, series)
    }

    /// Run with any regressor in place of the configured one
    pub fn run_with<R: Regressor>(&self, regressor: &R, series: &PriceSeries) -> Result<ForecastReport> {
        let span = info_span!("forecast", rows = series.len(), model = regressor.name());
        let _guard = span.enter();

        let raw = series.values();
        let lookback = self.config.lookback;
        let train_size = split::train_size(raw.len(), self.config.train_ratio)?;

        let scaler = match self.config.scaler_fit {
            ScalerFit::FullSeries => MinMaxScaler::fit(raw)?,
            ScalerFit::TrainOnly => MinMaxScaler::fit(&raw[..train_size])?,
        };
        let scaled = scaler.transform(raw);
        debug!(min = scaler.min(), max = scaler.max(), "Scaler fitted");

        let (train, test) = split::train_test_split(&scaled, self.config.train_ratio)?;
        debug!(train = train.len(), test = test.len(), "Series split");

        let builder = WindowBuilder::new(lookback)?;
        let (train_features, train_targets) = builder.build(train, "train")?.into_training_set();
        let train_windows = train_features.len();

        let model = regressor.fit(&train_features, &train_targets)?;
        debug!(windows = train_windows, "Model fitted");

        let test_set = builder.build(test, "test")?;
        let test_windows = test_set.len();

        let actual = match self.config.ground_truth {
            GroundTruth::RawSeries => raw[train_size + lookback..].to_vec(),
            GroundTruth::InverseScaled => scaler.inverse(&test_set.clone().into_targets()),
        };

        let predicted_scaled = model.predict(&test_set.into_features())?;
        let predicted = scaler.inverse(&predicted_scaled);

        let metrics = if self.config.legacy_score {
            metrics::score_with_legacy(&actual, &predicted)?
        } else {
            metrics::score(&actual, &predicted)?
        };

        info!(
            train_windows,
            test_windows,
            mae = metrics.mae,
            "Forecast complete"
        );

        Ok(ForecastReport {
            dates: series.dates().map(|d| d[train_size + lookback..].to_vec()),
            actual,
            predicted,
            metrics,
            train_size,
            test_size: test.len(),
            lookback,
            train_windows,
            test_windows,
            model: model.name().to_string(),
            scaler_min: scaler.min(),
            scaler_max: scaler.max(),
        })
    }
}
