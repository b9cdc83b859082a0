//! Kernel support vector regression backed by smartcore

use crate::config::RegressorConfig;
use crate::error::{ForecastError, Result};
use crate::models::{validate_features, validate_training_set, FittedRegressor, Regressor};
use forecast_math::kernels::Kernel;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::svm::svr::{SVRParameters, SVR};
use smartcore::svm::Kernels;
use tracing::debug;

/// Epsilon support vector regressor with a configurable kernel
#[derive(Debug, Clone)]
pub struct SupportVectorRegressor {
    /// Name of the model
    name: String,
    kernel: Kernel,
    c: f64,
    epsilon: f64,
    tolerance: f64,
}

/// Fitted support vector regressor.
///
/// smartcore's `SVR` borrows its training matrix and parameters, so the
/// fitted model owns them and solves again when asked to predict. The solver
/// is deterministic; both solves give the same model.
#[derive(Debug, Clone)]
pub struct FittedSupportVectorRegressor {
    /// Name of the model
    name: String,
    settings: SupportVectorRegressor,
    train: DenseMatrix<f64>,
    targets: Vec<f64>,
    feature_len: usize,
}

impl SupportVectorRegressor {
    /// Create a new regressor from its configuration
    pub fn new(config: &RegressorConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            name: config.to_string(),
            kernel: config.kernel()?,
            c: config.c,
            epsilon: config.epsilon,
            tolerance: config.tolerance,
        })
    }

    /// Kernel used by this regressor
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    fn parameters(&self) -> SVRParameters<f64> {
        let params = SVRParameters::default()
            .with_c(self.c)
            .with_eps(self.epsilon)
            .with_tol(self.tolerance);

        match self.kernel {
            Kernel::Rbf { gamma } => params.with_kernel(Kernels::rbf().with_gamma(gamma)),
            Kernel::Linear => params.with_kernel(Kernels::linear()),
            Kernel::Poly {
                gamma,
                coef0,
                degree,
            } => params.with_kernel(Kernels::polynomial()
                .with_degree(degree as f64)
                .with_gamma(gamma)
                .with_coef0(coef0)),
        }
    }

    /// Solve on a training set and predict `x` with the solution
    #[allow(clippy::ptr_arg)]
    fn solve_and_predict(
        &self,
        train: &DenseMatrix<f64>,
        targets: &Vec<f64>,
        x: &DenseMatrix<f64>,
    ) -> Result<Vec<f64>> {
        let params = self.parameters();
        let model = SVR::fit(train, targets, &params)
            .map_err(|e| ForecastError::Training(format!("SVR fit failed: {}", e)))?;
        model
            .predict(x)
            .map_err(|e| ForecastError::Math(format!("SVR prediction failed: {}", e)))
    }
}

impl Default for SupportVectorRegressor {
    fn default() -> Self {
        let config = RegressorConfig::default();
        Self {
            name: config.to_string(),
            kernel: Kernel::Rbf { gamma: config.gamma },
            c: config.c,
            epsilon: config.epsilon,
            tolerance: config.tolerance,
        }
    }
}

fn to_matrix(rows: &[Vec<f64>]) -> Result<DenseMatrix<f64>> {
    DenseMatrix::from_2d_vec(&rows.to_vec())
        .map_err(|e| ForecastError::Math(format!("Matrix creation failed: {}", e)))
}

impl Regressor for SupportVectorRegressor {
    type Fitted = FittedSupportVectorRegressor;

    fn fit(&self, features: &[Vec<f64>], targets: &[f64]) -> Result<Self::Fitted> {
        let feature_len = validate_training_set(features, targets)?;

        let train = to_matrix(features)?;
        let targets = targets.to_vec();

        // Solve once here so training failures surface from fit
        let fitted = self.solve_and_predict(&train, &targets, &train)?;
        if fitted.iter().any(|p| !p.is_finite()) {
            return Err(ForecastError::Training(
                "SVR produced non-finite fitted values".to_string(),
            ));
        }

        debug!(
            model = %self.name,
            samples = features.len(),
            feature_len,
            "Support vector regressor fitted"
        );

        Ok(FittedSupportVectorRegressor {
            name: self.name.clone(),
            settings: self.clone(),
            train,
            targets,
            feature_len,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedSupportVectorRegressor {
    /// Number of training windows the model was fit on
    pub fn training_len(&self) -> usize {
        self.targets.len()
    }
}

impl FittedRegressor for FittedSupportVectorRegressor {
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>> {
        validate_features(features, self.feature_len)?;
        if features.is_empty() {
            return Ok(Vec::new());
        }

        let x = to_matrix(features)?;
        self.settings.solve_and_predict(&self.train, &self.targets, &x)
    }

    fn feature_len(&self) -> usize {
        self.feature_len
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use forecast_math::kernels::KernelKind;

    fn sine_windows(count: usize, width: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
        let series: Vec<f64> = (0..count + width)
            .map(|i| 0.5 + 0.4 * (i as f64 * 0.2).sin())
            .collect();
        let features = (0..count).map(|i| series[i..i + width].to_vec()).collect();
        let targets = (0..count).map(|i| series[i + width]).collect();
        (features, targets)
    }

    #[test]
    fn test_linear_kernel_finds_flattest_tube_fit() {
        // Targets 0.5x + 0.2 on [0, 1] with a 0.1 tube: the flattest line
        // inside the tube is 0.3x + 0.3, touching it at both ends
        let features: Vec<Vec<f64>> = (0..5).map(|i| vec![i as f64 * 0.25]).collect();
        let targets: Vec<f64> = features.iter().map(|x| 0.5 * x[0] + 0.2).collect();
        let config = RegressorConfig {
            kernel: KernelKind::Linear,
            c: 1000.0,
            epsilon: 0.1,
            tolerance: 1e-6,
            ..RegressorConfig::default()
        };

        let fitted = SupportVectorRegressor::new(&config)
            .unwrap()
            .fit(&features, &targets)
            .unwrap();
        let predictions = fitted
            .predict(&[vec![0.0], vec![0.5], vec![1.0], vec![2.0]])
            .unwrap();

        assert_abs_diff_eq!(predictions[0], 0.3, epsilon = 1e-3);
        assert_abs_diff_eq!(predictions[1], 0.45, epsilon = 1e-3);
        assert_abs_diff_eq!(predictions[2], 0.6, epsilon = 1e-3);
        assert_abs_diff_eq!(predictions[3], 0.9, epsilon = 1e-3);
    }

    #[test]
    fn test_fit_and_predict_smooth_series() {
        let (features, targets) = sine_windows(80, 5);
        let model = SupportVectorRegressor::new(&RegressorConfig::default()).unwrap();
        let fitted = model.fit(&features, &targets).unwrap();

        assert_eq!(fitted.feature_len(), 5);
        assert_eq!(fitted.training_len(), 80);

        let predictions = fitted.predict(&features).unwrap();
        assert_eq!(predictions.len(), targets.len());
        for (p, t) in predictions.iter().zip(targets.iter()) {
            // Training residuals stay near the epsilon tube
            assert!((p - t).abs() < 0.15, "prediction {} vs target {}", p, t);
        }

        // Predicting again gives the same values
        assert_eq!(fitted.predict(&features).unwrap(), predictions);
    }

    #[test]
    fn test_predict_rejects_wrong_width() {
        let (features, targets) = sine_windows(20, 4);
        let fitted = SupportVectorRegressor::default()
            .fit(&features, &targets)
            .unwrap();

        let result = fitted.predict(&[vec![0.1, 0.2, 0.3]]);
        assert!(matches!(
            result,
            Err(ForecastError::Inference {
                expected: 4,
                actual: 3,
                row: 0
            })
        ));
        assert!(fitted.predict(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_fit_rejects_empty_training_set() {
        let result = SupportVectorRegressor::default().fit(&[], &[]);
        assert!(matches!(result, Err(ForecastError::Training(_))));
    }

    #[test]
    fn test_kernel_names() {
        let config = RegressorConfig {
            kernel: KernelKind::Linear,
            ..RegressorConfig::default()
        };
        let model = SupportVectorRegressor::new(&config).unwrap();
        assert_eq!(model.name(), "SVR(kernel=linear, C=1000)");
        assert_eq!(
            SupportVectorRegressor::default().name(),
            "SVR(kernel=rbf, C=1000, gamma=0.1)"
        );
    }

    #[test]
    fn test_poly_kernel_fits() {
        let (features, targets) = sine_windows(30, 3);
        let config = RegressorConfig {
            kernel: KernelKind::Poly,
            degree: 2,
            coef0: 1.0,
            c: 10.0,
            ..RegressorConfig::default()
        };
        let fitted = SupportVectorRegressor::new(&config)
            .unwrap()
            .fit(&features, &targets)
            .unwrap();
        let predictions = fitted.predict(&features).unwrap();
        assert!(predictions.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RegressorConfig {
            c: -5.0,
            ..RegressorConfig::default()
        };
        assert!(matches!(
            SupportVectorRegressor::new(&config),
            Err(ForecastError::InvalidParameter(_))
        ));
    }
}
