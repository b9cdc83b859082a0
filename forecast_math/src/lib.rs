//! # Forecast Math
//!
//! Mathematical building blocks for windowed price forecasting.
//! This crate provides the numeric pieces the forecasting pipeline is
//! assembled from:
//!
//! - Reversible min-max scaling
//! - The kernel families a support vector regressor can be configured with

use thiserror::Error;

pub mod kernels;
pub mod scaling;

/// Errors that can occur in forecasting math
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate range: every value equals {0}")]
    DegenerateRange(f64),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = MathError::DegenerateRange(4.5);
        assert_eq!(err.to_string(), "Degenerate range: every value equals 4.5");

        let err = MathError::InsufficientData("need 2 points".to_string());
        assert!(err.to_string().contains("need 2 points"));
    }
}
