//! Technical indicators module
//!
//! Stateless series functions: each indicator maps a price/OHLC series to an
//! output series of the same length, with `None` marking warm-up entries.
//! [`compute_indicators`] builds the per-run memoization map so every
//! distinct parameter set is computed exactly once.

pub mod bb;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stoch;

pub use bb::*;
pub use ema::*;
pub use macd::*;
pub use rsi::*;
pub use sma::*;
pub use stoch::*;

use crate::data::CandleSeries;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of one indicator computation: kind plus parameters.
///
/// Two rules referencing an identical spec share a single computed series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndicatorSpec {
    Sma {
        period: usize,
    },
    Ema {
        period: usize,
    },
    Rsi {
        period: usize,
    },
    Macd {
        fast_period: usize,
        slow_period: usize,
        signal_period: usize,
    },
    Bollinger {
        period: usize,
        std_dev: f64,
    },
    Stochastic {
        k_period: usize,
        d_period: usize,
        smoothing: usize,
    },
}

// std_dev is validated finite before a run, so bitwise equality is total
impl Eq for IndicatorSpec {}

impl Hash for IndicatorSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            IndicatorSpec::Sma { period }
            | IndicatorSpec::Ema { period }
            | IndicatorSpec::Rsi { period } => period.hash(state),
            IndicatorSpec::Macd {
                fast_period,
                slow_period,
                signal_period,
            } => {
                fast_period.hash(state);
                slow_period.hash(state);
                signal_period.hash(state);
            }
            IndicatorSpec::Bollinger { period, std_dev } => {
                period.hash(state);
                std_dev.to_bits().hash(state);
            }
            IndicatorSpec::Stochastic {
                k_period,
                d_period,
                smoothing,
            } => {
                k_period.hash(state);
                d_period.hash(state);
                smoothing.hash(state);
            }
        }
    }
}

impl fmt::Display for IndicatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorSpec::Sma { period } => write!(f, "SMA({period})"),
            IndicatorSpec::Ema { period } => write!(f, "EMA({period})"),
            IndicatorSpec::Rsi { period } => write!(f, "RSI({period})"),
            IndicatorSpec::Macd {
                fast_period,
                slow_period,
                signal_period,
            } => write!(f, "MACD({fast_period},{slow_period},{signal_period})"),
            IndicatorSpec::Bollinger { period, std_dev } => {
                write!(f, "BB({period},{std_dev})")
            }
            IndicatorSpec::Stochastic {
                k_period,
                d_period,
                smoothing,
            } => write!(f, "STOCH({k_period},{d_period},{smoothing})"),
        }
    }
}

impl IndicatorSpec {
    /// Check the parameter invariants that must hold before a run starts
    pub fn validate(&self) -> crate::error::Result<()> {
        let fail = |reason: String| Err(crate::error::BacktestError::InvalidConfig(reason));
        match *self {
            IndicatorSpec::Sma { period }
            | IndicatorSpec::Ema { period }
            | IndicatorSpec::Rsi { period } => {
                if period == 0 {
                    return fail(format!("{self}: period must be positive"));
                }
            }
            IndicatorSpec::Macd {
                fast_period,
                slow_period,
                signal_period,
            } => {
                if fast_period == 0 || signal_period == 0 {
                    return fail(format!("{self}: periods must be positive"));
                }
                if fast_period >= slow_period {
                    return fail(format!(
                        "{self}: fast period must be shorter than slow period"
                    ));
                }
            }
            IndicatorSpec::Bollinger { period, std_dev } => {
                if period == 0 {
                    return fail(format!("{self}: period must be positive"));
                }
                if !std_dev.is_finite() || std_dev <= 0.0 {
                    return fail(format!("{self}: std_dev must be a positive number"));
                }
            }
            IndicatorSpec::Stochastic {
                k_period,
                d_period,
                smoothing,
            } => {
                if k_period == 0 || d_period == 0 || smoothing == 0 {
                    return fail(format!("{self}: periods must be positive"));
                }
            }
        }
        Ok(())
    }

    /// Compute this indicator over a candle series
    pub fn compute(&self, candles: &CandleSeries) -> IndicatorSeries {
        let closes = candles.closes();
        match *self {
            IndicatorSpec::Sma { period } => {
                IndicatorSeries::Single(calculate_sma(&closes, period))
            }
            IndicatorSpec::Ema { period } => {
                IndicatorSeries::Single(calculate_ema(&closes, period))
            }
            IndicatorSpec::Rsi { period } => {
                IndicatorSeries::Single(calculate_rsi(&closes, period))
            }
            IndicatorSpec::Macd {
                fast_period,
                slow_period,
                signal_period,
            } => IndicatorSeries::Macd(calculate_macd(
                &closes,
                fast_period,
                slow_period,
                signal_period,
            )),
            IndicatorSpec::Bollinger { period, std_dev } => {
                IndicatorSeries::Bollinger(calculate_bollinger(&closes, period, std_dev))
            }
            IndicatorSpec::Stochastic {
                k_period,
                d_period,
                smoothing,
            } => IndicatorSeries::Stochastic(calculate_stochastic(
                &candles.highs(),
                &candles.lows(),
                &closes,
                k_period,
                d_period,
                smoothing,
            )),
        }
    }
}

/// Computed output of one indicator, aligned 1:1 with the candle series
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorSeries {
    /// SMA, EMA, RSI
    Single(Vec<Option<f64>>),
    Macd(MacdSeries),
    Bollinger(BollingerSeries),
    Stochastic(StochasticSeries),
}

impl IndicatorSeries {
    /// Number of entries (equals the candle count)
    pub fn len(&self) -> usize {
        self.primary().len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.primary().is_empty()
    }

    /// The line a plain value comparison reads: the series itself for
    /// single-line indicators, the MACD line, the Bollinger middle band, or
    /// the slow %K.
    pub fn primary(&self) -> &[Option<f64>] {
        match self {
            IndicatorSeries::Single(values) => values,
            IndicatorSeries::Macd(series) => &series.macd,
            IndicatorSeries::Bollinger(series) => &series.middle,
            IndicatorSeries::Stochastic(series) => &series.k,
        }
    }

    /// Primary-line value at an index
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.primary().get(index).copied().flatten()
    }
}

/// Compute every distinct indicator spec exactly once.
pub fn compute_indicators<I>(
    specs: I,
    candles: &CandleSeries,
) -> HashMap<IndicatorSpec, IndicatorSeries>
where
    I: IntoIterator<Item = IndicatorSpec>,
{
    let mut computed = HashMap::new();
    for spec in specs {
        computed
            .entry(spec)
            .or_insert_with(|| spec.compute(candles));
    }
    computed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Candle;
    use chrono::{TimeZone, Utc};

    fn series(closes: &[f64]) -> CandleSeries {
        CandleSeries::from_vec(
            closes
                .iter()
                .enumerate()
                .map(|(i, &close)| {
                    let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                        + chrono::Duration::days(i as i64);
                    Candle::new(date, close, close + 1.0, close - 1.0, close, 1000.0)
                })
                .collect(),
        )
    }

    #[test]
    fn test_compute_deduplicates_identical_specs() {
        let candles = series(&(0..40).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let spec = IndicatorSpec::Sma { period: 5 };
        let computed = compute_indicators([spec, spec, IndicatorSpec::Rsi { period: 14 }], &candles);
        assert_eq!(computed.len(), 2);
        assert!(computed.contains_key(&spec));
    }

    #[test]
    fn test_all_series_align_with_candles() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i % 9) as f64).collect();
        let candles = series(&closes);
        let specs = [
            IndicatorSpec::Sma { period: 20 },
            IndicatorSpec::Ema { period: 20 },
            IndicatorSpec::Rsi { period: 14 },
            IndicatorSpec::Macd {
                fast_period: 12,
                slow_period: 26,
                signal_period: 9,
            },
            IndicatorSpec::Bollinger {
                period: 20,
                std_dev: 2.0,
            },
            IndicatorSpec::Stochastic {
                k_period: 14,
                d_period: 3,
                smoothing: 3,
            },
        ];
        for (spec, series) in compute_indicators(specs, &candles) {
            assert_eq!(series.len(), closes.len(), "{spec} misaligned");
        }
    }

    #[test]
    fn test_spec_display() {
        let spec = IndicatorSpec::Macd {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        };
        assert_eq!(spec.to_string(), "MACD(12,26,9)");
    }
}
