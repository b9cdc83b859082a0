//! # Price Forecast Workspace
//!
//! Umbrella crate over the workspace members:
//!
//! - [`math`]: min-max scaling and kernel selection
//! - [`forecast`]: loading, windowing, the smartcore-backed regressor and the pipeline
//!
//! ## Example
//!
//! ```
//! use price_forecast_workspace::forecast::{synthetic, Pipeline, PriceSeries};
//! use price_forecast_workspace::forecast::config::PipelineConfig;
//!
//! let config = PipelineConfig { lookback: 5, ..PipelineConfig::default() };
//! let series = PriceSeries::new("Close", synthetic::linear_series(60, 10.0, 0.5)).unwrap();
//! let report = Pipeline::new(config).unwrap().run_series(&series).unwrap();
//! assert_eq!(report.len(), 7);
//! ```

pub use forecast_math as math;
pub use price_forecast as forecast;
