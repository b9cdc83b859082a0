//! Error types for the price_forecast crate

use forecast_math::MathError;
use thiserror::Error;

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Input could not be parsed, or the price column is missing
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Input parsed but held no observations
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Every observation has the same value, so min-max scaling is undefined
    #[error("Degenerate range: every value equals {0}, cannot scale")]
    DegenerateRange(f64),

    /// A partition is too short to produce a single lookback window
    #[error(
        "Insufficient data in {partition} partition: need more than {lookback} values, got {len}"
    )]
    InsufficientData {
        partition: String,
        lookback: usize,
        len: usize,
    },

    /// Model fitting failed
    #[error("Training error: {0}")]
    Training(String),

    /// A feature vector does not match the fit-time width
    #[error("Inference error: expected {expected} features, got {actual} at row {row}")]
    Inference {
        expected: usize,
        actual: usize,
        row: usize,
    },

    /// Two sequences that must align have different lengths
    #[error("Length mismatch in {context}: {left} vs {right}")]
    LengthMismatch {
        context: String,
        left: usize,
        right: usize,
    },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failure inside the numeric backend
    #[error("Math error: {0}")]
    Math(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::DegenerateRange(value) => ForecastError::DegenerateRange(value),
            MathError::InsufficientData(msg) => ForecastError::EmptyData(msg),
            MathError::InvalidInput(msg) => ForecastError::InvalidParameter(msg),
        }
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => ForecastError::IoError(io),
            _ => ForecastError::DataFormat(message),
        }
    }
}

impl ForecastError {
    /// Short stable name of the error kind, for reporting
    pub fn kind(&self) -> &'static str {
        match self {
            ForecastError::DataFormat(_) => "DataFormatError",
            ForecastError::EmptyData(_) => "EmptyDataError",
            ForecastError::DegenerateRange(_) => "DegenerateRangeError",
            ForecastError::InsufficientData { .. } => "InsufficientDataError",
            ForecastError::Training(_) => "TrainingError",
            ForecastError::Inference { .. } => "InferenceError",
            ForecastError::LengthMismatch { .. } => "LengthMismatchError",
            ForecastError::InvalidParameter(_) => "InvalidParameter",
            ForecastError::Math(_) => "MathError",
            ForecastError::IoError(_) => "IoError",
        }
    }
}
