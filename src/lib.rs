//! TradeSim-RS: a backtesting engine for rule-based trading strategies
//!
//! This crate simulates a strategy against a historical OHLCV candle series:
//!
//! - **Indicators**: SMA, EMA, RSI, MACD, Bollinger Bands, Slow Stochastic,
//!   computed once per distinct parameter set and aligned 1:1 with the input
//! - **Rules**: entry/exit conditions combined AND-for-entry, OR-for-exit
//! - **Simulation**: a per-candle FLAT/LONG/SHORT state machine with
//!   stop-loss, take-profit, indicator-driven exits and position sizing
//! - **Metrics**: trade statistics, equity curve, drawdown, Sharpe ratio
//!
//! # Example
//!
//! ```no_run
//! use tradesim_rs::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let candles = CandleSeries::from_vec(load_candles());
//!     let config = StrategyConfig::default();
//!     let result = run_backtest(&config, &candles)?;
//!     println!("{}", BacktestReport::new(result).format());
//!     Ok(())
//! }
//! # fn load_candles() -> Vec<Candle> { Vec::new() }
//! ```

pub mod backtest;
pub mod data;
pub mod error;
pub mod indicators;
pub mod strategy;

// Re-export commonly used types
pub mod prelude {
    pub use crate::backtest::*;
    pub use crate::data::*;
    pub use crate::error::{BacktestError, Result};
    pub use crate::indicators::*;
    pub use crate::strategy::*;
}

pub use crate::backtest::run_backtest;
pub use crate::error::{BacktestError, Result};
