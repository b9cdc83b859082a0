//! Kernel selection for support vector regression
//!
//! Names and validates the kernels a regressor can be configured with:
//! - Radial basis function (RBF)
//! - Linear
//! - Polynomial
//!
//! Evaluation is left to the regression backend; this module only checks
//! that a kernel's parameters are usable.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kernel family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelKind {
    #[default]
    Rbf,
    Linear,
    Poly,
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelKind::Rbf => write!(f, "rbf"),
            KernelKind::Linear => write!(f, "linear"),
            KernelKind::Poly => write!(f, "poly"),
        }
    }
}

impl FromStr for KernelKind {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rbf" => Ok(KernelKind::Rbf),
            "linear" => Ok(KernelKind::Linear),
            "poly" | "polynomial" => Ok(KernelKind::Poly),
            other => Err(MathError::InvalidInput(format!(
                "Unknown kernel '{}', expected rbf, linear or poly",
                other
            ))),
        }
    }
}

/// A kernel family together with its validated parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    /// `exp(-gamma * |x - y|^2)`
    Rbf { gamma: f64 },
    /// `x . y`
    Linear,
    /// `(gamma * x . y + coef0)^degree`
    Poly { gamma: f64, coef0: f64, degree: u32 },
}

impl Kernel {
    /// Build a kernel from its family and parameters, ignoring the ones the
    /// family does not use
    pub fn new(kind: KernelKind, gamma: f64, coef0: f64, degree: u32) -> Result<Self> {
        match kind {
            KernelKind::Rbf => {
                check_gamma(gamma)?;
                Ok(Kernel::Rbf { gamma })
            }
            KernelKind::Linear => Ok(Kernel::Linear),
            KernelKind::Poly => {
                check_gamma(gamma)?;
                if degree == 0 {
                    return Err(MathError::InvalidInput(
                        "Polynomial degree must be at least 1".to_string(),
                    ));
                }
                if !coef0.is_finite() {
                    return Err(MathError::InvalidInput(format!(
                        "Polynomial coef0 must be finite, got {}",
                        coef0
                    )));
                }
                Ok(Kernel::Poly {
                    gamma,
                    coef0,
                    degree,
                })
            }
        }
    }

    /// Family of this kernel
    pub fn kind(&self) -> KernelKind {
        match self {
            Kernel::Rbf { .. } => KernelKind::Rbf,
            Kernel::Linear => KernelKind::Linear,
            Kernel::Poly { .. } => KernelKind::Poly,
        }
    }
}

fn check_gamma(gamma: f64) -> Result<()> {
    if gamma > 0.0 && gamma.is_finite() {
        Ok(())
    } else {
        Err(MathError::InvalidInput(format!(
            "Kernel gamma must be positive, got {}",
            gamma
        )))
    }
}
