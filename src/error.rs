//! Backtest error types

use thiserror::Error;

/// Errors raised before a simulation starts.
///
/// Indicator warm-up gaps are not errors: they surface as `None` entries in
/// the computed series and degrade rule evaluation locally.
#[derive(Debug, Error)]
pub enum BacktestError {
    /// Fewer candles than the simulation can process
    #[error("insufficient data: {got} candles, need at least {need}")]
    InsufficientData { got: usize, need: usize },

    /// A candle with non-finite or inconsistent OHLC fields
    #[error("malformed candle at index {index}: {reason}")]
    MalformedCandle { index: usize, reason: String },

    /// Strategy configuration violates an invariant
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A rule's condition family does not apply to its indicator kind
    #[error("rule condition {condition} cannot be evaluated against {indicator}")]
    IncompatibleRule {
        condition: String,
        indicator: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BacktestError>;
