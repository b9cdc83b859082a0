//! # Price Forecast
//!
//! Short-horizon forecasting of a univariate price series with a windowed
//! support vector regressor.
//!
//! ## Pipeline
//!
//! 1. Load closing prices from a delimited file ([`SeriesLoader`])
//! 2. Min-max scale them to `[0, 1]` ([`MinMaxScaler`])
//! 3. Split chronologically into a training prefix and a test suffix
//! 4. Slide a 60-value lookback window over each partition ([`WindowBuilder`])
//! 5. Fit an RBF support vector regressor on the training windows
//! 6. Predict the test windows and map the predictions back to prices
//! 7. Score them against the unscaled ground truth ([`metrics::score`])
//!
//! ## Quick Start
//!
//! ```no_run
//! use price_forecast::Pipeline;
//!
//! let report = Pipeline::default().run("prices.csv")?;
//! println!("{}", report.metrics);
//! for (date, actual, predicted) in report.rows() {
//!     println!("{:?} {:.2} {:.2}", date, actual, predicted);
//! }
//! # Ok::<(), price_forecast::ForecastError>(())
//! ```
//!
//! Swapping the model does not touch the pipeline:
//!
//! ```no_run
//! use price_forecast::config::{PipelineConfig, RegressorConfig};
//! use price_forecast::kernels::KernelKind;
//! use price_forecast::Pipeline;
//!
//! let config = PipelineConfig {
//!     regressor: RegressorConfig {
//!         kernel: KernelKind::Linear,
//!         c: 10.0,
//!         ..RegressorConfig::default()
//!     },
//!     ..PipelineConfig::default()
//! };
//! let report = Pipeline::new(config)?.run("prices.csv")?;
//! # Ok::<(), price_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod split;
pub mod synthetic;
pub mod window;

// Re-export commonly used types
pub use crate::config::{GroundTruth, PipelineConfig, RegressorConfig, ScalerFit};
pub use crate::data::{PriceSeries, SeriesLoader};
pub use crate::error::{ForecastError, Result};
pub use crate::metrics::Metrics;
pub use crate::models::svr::SupportVectorRegressor;
pub use crate::models::{FittedRegressor, Regressor};
pub use crate::pipeline::{ForecastReport, Pipeline};
pub use crate::window::{Window, WindowBuilder};
pub use forecast_math::kernels;
pub use forecast_math::scaling::MinMaxScaler;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
