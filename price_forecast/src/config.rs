//! Configuration records for the forecasting pipeline
//!
//! Every parameter has a default matching the reference run: a `Close`
//! column, a 60-value lookback, an 80/20 chronological split and an RBF
//! support vector regressor with `C = 1000` and `gamma = 0.1`.

use crate::error::{ForecastError, Result};
use forecast_math::kernels::{Kernel, KernelKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default lookback window length
pub const DEFAULT_LOOKBACK: usize = 60;
/// Default fraction of the series used for training
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;
/// Default price column
pub const DEFAULT_PRICE_COLUMN: &str = "Close";

/// How the input file is read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Name of the price column
    pub price_column: String,
    /// Field delimiter
    pub delimiter: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            price_column: DEFAULT_PRICE_COLUMN.to_string(),
            delimiter: b',',
        }
    }
}

/// Which observations the scaler is fit on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalerFit {
    /// Whole series, train and test (reference behaviour, leaks the test range)
    #[default]
    FullSeries,
    /// Training prefix only
    TrainOnly,
}

impl FromStr for ScalerFit {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "full" | "full_series" => Ok(ScalerFit::FullSeries),
            "train" | "train_only" => Ok(ScalerFit::TrainOnly),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unknown scaler fit '{}', expected full or train",
                other
            ))),
        }
    }
}

/// Where the ground truth for scoring comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundTruth {
    /// Slice of the unscaled input series (reference behaviour)
    #[default]
    RawSeries,
    /// Scaled test targets mapped back through the scaler
    InverseScaled,
}

impl FromStr for GroundTruth {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "raw" | "raw_series" => Ok(GroundTruth::RawSeries),
            "inverse" | "inverse_scaled" => Ok(GroundTruth::InverseScaled),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unknown ground truth '{}', expected raw or inverse",
                other
            ))),
        }
    }
}

/// Support vector regressor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressorConfig {
    pub kernel: KernelKind,
    /// Regularisation strength
    pub c: f64,
    /// Kernel coefficient for rbf and poly
    pub gamma: f64,
    /// Width of the insensitive tube
    pub epsilon: f64,
    /// Polynomial degree
    pub degree: u32,
    /// Polynomial offset
    pub coef0: f64,
    /// Solver stopping tolerance
    pub tolerance: f64,
}

impl Default for RegressorConfig {
    fn default() -> Self {
        Self {
            kernel: KernelKind::Rbf,
            c: 1e3,
            gamma: 0.1,
            epsilon: 0.1,
            degree: 3,
            coef0: 0.0,
            tolerance: 1e-3,
        }
    }
}

impl RegressorConfig {
    /// Build the kernel described by this config
    pub fn kernel(&self) -> Result<Kernel> {
        Ok(Kernel::new(self.kernel, self.gamma, self.coef0, self.degree)?)
    }

    /// Validate every setting
    pub fn validate(&self) -> Result<()> {
        self.kernel()?;
        if !(self.c > 0.0 && self.c.is_finite()) {
            return Err(ForecastError::InvalidParameter(format!(
                "C must be positive and finite, got {}",
                self.c
            )));
        }
        if !(self.epsilon >= 0.0 && self.epsilon.is_finite()) {
            return Err(ForecastError::InvalidParameter(format!(
                "Epsilon must be non-negative, got {}",
                self.epsilon
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(ForecastError::InvalidParameter(format!(
                "Tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

impl fmt::Display for RegressorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kernel {
            KernelKind::Rbf => write!(f, "SVR(kernel=rbf, C={}, gamma={})", self.c, self.gamma),
            KernelKind::Linear => write!(f, "SVR(kernel=linear, C={})", self.c),
            KernelKind::Poly => write!(
                f,
                "SVR(kernel=poly, C={}, gamma={}, degree={}, coef0={})",
                self.c, self.gamma, self.degree, self.coef0
            ),
        }
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub loader: LoaderConfig,
    /// Number of past values per feature window
    pub lookback: usize,
    /// Fraction of the series in the training prefix
    pub train_ratio: f64,
    pub scaler_fit: ScalerFit,
    pub ground_truth: GroundTruth,
    /// Also report the legacy scaled mean difference
    pub legacy_score: bool,
    pub regressor: RegressorConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            loader: LoaderConfig::default(),
            lookback: DEFAULT_LOOKBACK,
            train_ratio: DEFAULT_TRAIN_RATIO,
            scaler_fit: ScalerFit::default(),
            ground_truth: GroundTruth::default(),
            legacy_score: false,
            regressor: RegressorConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Validate every setting
    pub fn validate(&self) -> Result<()> {
        if self.lookback == 0 {
            return Err(ForecastError::InvalidParameter(
                "Lookback must be at least 1".to_string(),
            ));
        }
        if !(self.train_ratio > 0.0 && self.train_ratio < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Train ratio must be strictly between 0 and 1, got {}",
                self.train_ratio
            )));
        }
        if self.loader.price_column.trim().is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Price column name cannot be empty".to_string(),
            ));
        }
        self.regressor.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = PipelineConfig::default();
        assert_eq!(config.lookback, 60);
        assert_eq!(config.train_ratio, 0.8);
        assert_eq!(config.loader.price_column, "Close");
        assert_eq!(config.scaler_fit, ScalerFit::FullSeries);
        assert_eq!(config.ground_truth, GroundTruth::RawSeries);
        assert_eq!(config.regressor.kernel, KernelKind::Rbf);
        assert_eq!(config.regressor.c, 1000.0);
        assert_eq!(config.regressor.gamma, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = PipelineConfig::default();
        config.train_ratio = 1.0;
        assert!(matches!(
            config.validate(),
            Err(ForecastError::InvalidParameter(_))
        ));

        let mut config = PipelineConfig::default();
        config.lookback = 0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.regressor.gamma = -1.0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.regressor.epsilon = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ForecastError::InvalidParameter(_))
        ));

        let mut config = PipelineConfig::default();
        config.regressor.tolerance = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"lookback": 10, "regressor": {"kernel": "linear"}}"#).unwrap();
        assert_eq!(config.lookback, 10);
        assert_eq!(config.train_ratio, 0.8);
        assert_eq!(config.regressor.kernel, KernelKind::Linear);
        assert_eq!(config.regressor.c, 1000.0);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("train".parse::<ScalerFit>().unwrap(), ScalerFit::TrainOnly);
        assert_eq!("inverse".parse::<GroundTruth>().unwrap(), GroundTruth::InverseScaled);
        assert!("sideways".parse::<GroundTruth>().is_err());
    }
}
