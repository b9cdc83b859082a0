//! Price series loading for forecasting

use crate::config::LoaderConfig;
use crate::error::{ForecastError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Date formats tried, in order, on the detected date column
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Ordered series of closing prices, oldest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    /// Name of the column the prices were read from
    column: String,
    /// Prices in file row order
    values: Vec<f64>,
    /// Row dates, when the file has a parseable date column
    dates: Option<Vec<NaiveDate>>,
}

impl PriceSeries {
    /// Create a series from in-memory prices
    pub fn new(column: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let column = column.into();
        if values.is_empty() {
            return Err(ForecastError::EmptyData(format!(
                "Column '{}' holds no values",
                column
            )));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::DataFormat(format!(
                "Value {} at position {} of column '{}' is not finite",
                values[pos], pos, column
            )));
        }

        Ok(Self {
            column,
            values,
            dates: None,
        })
    }

    /// Attach row dates to the series
    pub fn with_dates(mut self, dates: Vec<NaiveDate>) -> Result<Self> {
        if dates.len() != self.values.len() {
            return Err(ForecastError::LengthMismatch {
                context: "series dates".to_string(),
                left: self.values.len(),
                right: dates.len(),
            });
        }
        self.dates = Some(dates);
        Ok(self)
    }

    /// Prices in chronological order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Row dates, if known
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        self.dates.as_deref()
    }

    /// Source column name
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Loader for delimited price files
#[derive(Debug)]
pub struct SeriesLoader;

impl SeriesLoader {
    /// Load a price series from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<PriceSeries> {
        let path = path.as_ref();
        debug!(path = %path.display(), column = %config.price_column, "Loading price series");
        let file = File::open(path)?;
        Self::from_reader(file, config)
    }

    /// Load a price series from any reader holding delimited text
    pub fn from_reader<R: Read>(reader: R, config: &LoaderConfig) -> Result<PriceSeries> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        let price_idx = Self::detect_price_column(&headers, &config.price_column)?;
        let date_idx = Self::detect_date_column(&headers);
        let column = headers[price_idx].clone();

        let mut values = Vec::new();
        let mut raw_dates = Vec::new();
        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            // Header is line 1
            let line = row + 2;

            let cell = record.get(price_idx).ok_or_else(|| {
                ForecastError::DataFormat(format!(
                    "Line {} has no value for column '{}'",
                    line, column
                ))
            })?;
            values.push(Self::parse_price(cell, &column, line)?);

            if let Some(idx) = date_idx {
                raw_dates.push(record.get(idx).unwrap_or_default().to_string());
            }
        }

        if values.is_empty() {
            return Err(ForecastError::EmptyData(format!(
                "Column '{}' holds no values",
                column
            )));
        }

        let series = PriceSeries::new(column, values)?;
        let series = match date_idx {
            Some(idx) => match Self::parse_dates(&raw_dates) {
                Some(dates) => series.with_dates(dates)?,
                None => {
                    warn!(
                        column = %headers[idx],
                        "Date column could not be parsed on every row, continuing without dates"
                    );
                    series
                }
            },
            None => series,
        };

        debug!(rows = series.len(), column = series.column(), "Price series loaded");
        Ok(series)
    }

    /// Resolve the price column by exact name, then case-insensitive name.
    ///
    /// Other price-like headers such as `Adj Close` are never substituted.
    fn detect_price_column(headers: &[String], wanted: &str) -> Result<usize> {
        if let Some(idx) = headers.iter().position(|h| h == wanted) {
            return Ok(idx);
        }

        let wanted_lower = wanted.to_lowercase();
        if let Some(idx) = headers.iter().position(|h| h.to_lowercase() == wanted_lower) {
            return Ok(idx);
        }

        Err(ForecastError::DataFormat(format!(
            "No price column '{}' in header [{}]",
            wanted,
            headers.join(", ")
        )))
    }

    /// Detect the date column by header name
    fn detect_date_column(headers: &[String]) -> Option<usize> {
        headers.iter().position(|name| {
            let lower = name.to_lowercase();
            lower.contains("date") || lower.contains("time") || lower.contains("timestamp")
        })
    }

    fn parse_price(cell: &str, column: &str, line: usize) -> Result<f64> {
        if cell.is_empty() {
            return Err(ForecastError::DataFormat(format!(
                "Missing value in column '{}' on line {}",
                column, line
            )));
        }

        let value: f64 = cell.parse().map_err(|_| {
            ForecastError::DataFormat(format!(
                "Value '{}' in column '{}' on line {} is not a number",
                cell, column, line
            ))
        })?;

        if !value.is_finite() {
            return Err(ForecastError::DataFormat(format!(
                "Value '{}' in column '{}' on line {} is not finite",
                cell, column, line
            )));
        }

        Ok(value)
    }

    /// Parse every raw date, or give up if any row fails
    fn parse_dates(raw: &[String]) -> Option<Vec<NaiveDate>> {
        raw.iter().map(|s| parse_date(s)).collect()
    }
}

/// Parse a date or datetime cell into a calendar date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(parse_date("2023-01-05"), Some(expected));
        assert_eq!(parse_date("2023/01/05"), Some(expected));
        assert_eq!(parse_date("01/05/2023"), Some(expected));
        assert_eq!(parse_date("2023-01-05 16:00:00"), Some(expected));
        assert_eq!(parse_date("2023-01-05T16:00:00Z"), Some(expected));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_detect_price_column_order() {
        let headers: Vec<String> = ["Date", "Adj Close", "Close"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(SeriesLoader::detect_price_column(&headers, "Close").unwrap(), 2);
        assert_eq!(SeriesLoader::detect_price_column(&headers, "close").unwrap(), 2);

        let headers: Vec<String> = ["ts", "last_price"].iter().map(|s| s.to_string()).collect();
        assert!(matches!(
            SeriesLoader::detect_price_column(&headers, "Close"),
            Err(ForecastError::DataFormat(_))
        ));

        let headers: Vec<String> = ["Date", "Adj Close"].iter().map(|s| s.to_string()).collect();
        assert!(matches!(
            SeriesLoader::detect_price_column(&headers, "Close"),
            Err(ForecastError::DataFormat(_))
        ));

        let headers: Vec<String> = ["ts", "volume"].iter().map(|s| s.to_string()).collect();
        assert!(SeriesLoader::detect_price_column(&headers, "Close").is_err());
    }

    #[test]
    fn test_series_rejects_non_finite() {
        assert!(matches!(
            PriceSeries::new("Close", vec![1.0, f64::INFINITY]),
            Err(ForecastError::DataFormat(_))
        ));
        assert!(matches!(
            PriceSeries::new("Close", vec![]),
            Err(ForecastError::EmptyData(_))
        ));
    }
}
