//! OHLCV candle data structures

use crate::error::{BacktestError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV candle data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    /// Timestamp
    pub date: DateTime<Utc>,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume
    pub volume: f64,
}

impl Candle {
    /// Create a new candle
    pub fn new(date: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check that all OHLC fields are finite numbers
    pub fn is_well_formed(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
    }

    /// Get total range (high - low)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Check if candle is bullish
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if candle is bearish
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Collection of candles, ordered ascending by date
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Create new empty series
    pub fn new() -> Self {
        Self {
            candles: Vec::new(),
        }
    }

    /// Create from vector of candles
    pub fn from_vec(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    /// Add a candle
    pub fn push(&mut self, candle: Candle) {
        self.candles.push(candle);
    }

    /// Get number of candles
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Check if series is empty
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Get candle at index
    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// Get last candle
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Get all candles
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Get close prices as vector
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Get high prices as vector
    pub fn highs(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.high).collect()
    }

    /// Get low prices as vector
    pub fn lows(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.low).collect()
    }

    /// Sort by timestamp (oldest first)
    pub fn sort_by_time(&mut self) {
        self.candles.sort_by_key(|c| c.date);
    }

    /// Validate the series as simulation input.
    ///
    /// Requires at least `min_len` candles, finite OHLC fields, and strictly
    /// ascending timestamps.
    pub fn validate(&self, min_len: usize) -> Result<()> {
        if self.candles.len() < min_len {
            return Err(BacktestError::InsufficientData {
                got: self.candles.len(),
                need: min_len,
            });
        }
        for (i, candle) in self.candles.iter().enumerate() {
            if !candle.is_well_formed() {
                return Err(BacktestError::MalformedCandle {
                    index: i,
                    reason: "non-finite OHLC field".to_string(),
                });
            }
            if i > 0 && candle.date <= self.candles[i - 1].date {
                return Err(BacktestError::MalformedCandle {
                    index: i,
                    reason: "timestamp not strictly ascending".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<Candle>> for CandleSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::from_vec(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn candle_at(day: u32, close: f64) -> Candle {
        let date = Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
        Candle::new(date, close, close + 1.0, close - 1.0, close, 1000.0)
    }

    #[test]
    fn test_candle_shape() {
        let candle = candle_at(1, 100.0);
        assert!(candle.is_well_formed());
        assert_eq!(candle.range(), 2.0);
        assert!(!candle.is_bullish());
        assert!(!candle.is_bearish());
    }

    #[test]
    fn test_series_accessors() {
        let series = CandleSeries::from_vec(vec![candle_at(1, 100.0), candle_at(2, 101.0)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![100.0, 101.0]);
        assert_eq!(series.highs(), vec![101.0, 102.0]);
        assert_eq!(series.lows(), vec![99.0, 100.0]);
        assert!(series.validate(2).is_ok());
    }

    #[test]
    fn test_validate_rejects_short_series() {
        let series = CandleSeries::from_vec(vec![candle_at(1, 100.0)]);
        assert!(matches!(
            series.validate(2),
            Err(BacktestError::InsufficientData { got: 1, need: 2 })
        ));
    }

    #[test]
    fn test_validate_rejects_nan_field() {
        let mut bad = candle_at(2, 100.0);
        bad.close = f64::NAN;
        let series = CandleSeries::from_vec(vec![candle_at(1, 100.0), bad]);
        assert!(matches!(
            series.validate(2),
            Err(BacktestError::MalformedCandle { index: 1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_dates() {
        let series = CandleSeries::from_vec(vec![candle_at(1, 100.0), candle_at(1, 101.0)]);
        assert!(matches!(
            series.validate(2),
            Err(BacktestError::MalformedCandle { index: 1, .. })
        ));
    }
}
