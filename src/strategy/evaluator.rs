//! Condition evaluation
//!
//! Turns precomputed indicator values into per-candle booleans. Entries
//! combine rules with AND and fail closed on missing data; exits combine
//! with OR and skip rules that cannot be evaluated yet. The asymmetry is
//! deliberate: a position is hard to enter and easy to leave.

use crate::data::CandleSeries;
use crate::indicators::{BollingerSeries, IndicatorSeries, IndicatorSpec, MacdSeries, StochasticSeries};
use crate::strategy::{Condition, ConditionRule};
use std::collections::HashMap;

/// How a rule set combines into one boolean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineMode {
    /// Every rule must hold; an unevaluable rule fails the set (entries)
    All,
    /// One holding rule suffices; unevaluable rules are skipped (exits)
    Any,
}

/// Evaluate a rule set at a candle index.
///
/// In `All` mode an empty rule set yields `false`: a side with no entry
/// rules never trades.
pub fn evaluate_rules(
    rules: &[ConditionRule],
    mode: CombineMode,
    index: usize,
    candles: &CandleSeries,
    indicators: &HashMap<IndicatorSpec, IndicatorSeries>,
) -> bool {
    match mode {
        CombineMode::All => {
            !rules.is_empty()
                && rules
                    .iter()
                    .all(|rule| evaluate_rule(rule, index, candles, indicators) == Some(true))
        }
        CombineMode::Any => rules
            .iter()
            .any(|rule| evaluate_rule(rule, index, candles, indicators) == Some(true)),
    }
}

/// Evaluate one rule at a candle index.
///
/// `None` means the rule cannot be evaluated there: the indicator is still
/// warming up, or a crossing rule has no previous bar to compare against.
pub fn evaluate_rule(
    rule: &ConditionRule,
    index: usize,
    candles: &CandleSeries,
    indicators: &HashMap<IndicatorSpec, IndicatorSeries>,
) -> Option<bool> {
    let series = indicators.get(&rule.indicator)?;
    let close = candles.get(index)?.close;

    match rule.condition {
        Condition::PriceAbove => Some(close > series.value_at(index)?),
        Condition::PriceBelow => Some(close < series.value_at(index)?),
        Condition::PriceCrossAbove => {
            let prev = index.checked_sub(1)?;
            Some(crossed_above(
                candles.get(prev)?.close,
                series.value_at(prev)?,
                close,
                series.value_at(index)?,
            ))
        }
        Condition::PriceCrossBelow => {
            let prev = index.checked_sub(1)?;
            Some(crossed_below(
                candles.get(prev)?.close,
                series.value_at(prev)?,
                close,
                series.value_at(index)?,
            ))
        }

        Condition::AboveThreshold { threshold } => Some(series.value_at(index)? > threshold),
        Condition::BelowThreshold { threshold } => Some(series.value_at(index)? < threshold),
        Condition::CrossAboveThreshold { threshold } => {
            let prev = index.checked_sub(1)?;
            Some(crossed_above(
                series.value_at(prev)?,
                threshold,
                series.value_at(index)?,
                threshold,
            ))
        }
        Condition::CrossBelowThreshold { threshold } => {
            let prev = index.checked_sub(1)?;
            Some(crossed_below(
                series.value_at(prev)?,
                threshold,
                series.value_at(index)?,
                threshold,
            ))
        }

        Condition::MacdAboveSignal => {
            let macd = as_macd(series)?;
            Some(line_at(&macd.macd, index)? > line_at(&macd.signal, index)?)
        }
        Condition::MacdBelowSignal => {
            let macd = as_macd(series)?;
            Some(line_at(&macd.macd, index)? < line_at(&macd.signal, index)?)
        }
        Condition::MacdCrossAboveSignal => {
            let macd = as_macd(series)?;
            let prev = index.checked_sub(1)?;
            Some(crossed_above(
                line_at(&macd.macd, prev)?,
                line_at(&macd.signal, prev)?,
                line_at(&macd.macd, index)?,
                line_at(&macd.signal, index)?,
            ))
        }
        Condition::MacdCrossBelowSignal => {
            let macd = as_macd(series)?;
            let prev = index.checked_sub(1)?;
            Some(crossed_below(
                line_at(&macd.macd, prev)?,
                line_at(&macd.signal, prev)?,
                line_at(&macd.macd, index)?,
                line_at(&macd.signal, index)?,
            ))
        }
        Condition::MacdAboveZero => {
            let macd = as_macd(series)?;
            Some(line_at(&macd.macd, index)? > 0.0)
        }
        Condition::MacdBelowZero => {
            let macd = as_macd(series)?;
            Some(line_at(&macd.macd, index)? < 0.0)
        }
        Condition::MacdCrossAboveZero => {
            let macd = as_macd(series)?;
            let prev = index.checked_sub(1)?;
            Some(crossed_above(
                line_at(&macd.macd, prev)?,
                0.0,
                line_at(&macd.macd, index)?,
                0.0,
            ))
        }
        Condition::MacdCrossBelowZero => {
            let macd = as_macd(series)?;
            let prev = index.checked_sub(1)?;
            Some(crossed_below(
                line_at(&macd.macd, prev)?,
                0.0,
                line_at(&macd.macd, index)?,
                0.0,
            ))
        }

        Condition::PriceAboveUpperBand => {
            let bands = as_bollinger(series)?;
            Some(close > line_at(&bands.upper, index)?)
        }
        Condition::PriceBelowLowerBand => {
            let bands = as_bollinger(series)?;
            Some(close < line_at(&bands.lower, index)?)
        }
        Condition::PriceCrossAboveUpperBand => {
            let bands = as_bollinger(series)?;
            let prev = index.checked_sub(1)?;
            Some(crossed_above(
                candles.get(prev)?.close,
                line_at(&bands.upper, prev)?,
                close,
                line_at(&bands.upper, index)?,
            ))
        }
        Condition::PriceCrossBelowLowerBand => {
            let bands = as_bollinger(series)?;
            let prev = index.checked_sub(1)?;
            Some(crossed_below(
                candles.get(prev)?.close,
                line_at(&bands.lower, prev)?,
                close,
                line_at(&bands.lower, index)?,
            ))
        }

        Condition::KCrossAboveD => {
            let stoch = as_stochastic(series)?;
            let prev = index.checked_sub(1)?;
            Some(crossed_above(
                line_at(&stoch.k, prev)?,
                line_at(&stoch.d, prev)?,
                line_at(&stoch.k, index)?,
                line_at(&stoch.d, index)?,
            ))
        }
        Condition::KCrossBelowD => {
            let stoch = as_stochastic(series)?;
            let prev = index.checked_sub(1)?;
            Some(crossed_below(
                line_at(&stoch.k, prev)?,
                line_at(&stoch.d, prev)?,
                line_at(&stoch.k, index)?,
                line_at(&stoch.d, index)?,
            ))
        }
    }
}

/// `a` moved from at-or-below `b` to above it between two bars
fn crossed_above(prev_a: f64, prev_b: f64, a: f64, b: f64) -> bool {
    prev_a <= prev_b && a > b
}

/// `a` moved from at-or-above `b` to below it between two bars
fn crossed_below(prev_a: f64, prev_b: f64, a: f64, b: f64) -> bool {
    prev_a >= prev_b && a < b
}

fn line_at(line: &[Option<f64>], index: usize) -> Option<f64> {
    line.get(index).copied().flatten()
}

fn as_macd(series: &IndicatorSeries) -> Option<&MacdSeries> {
    match series {
        IndicatorSeries::Macd(macd) => Some(macd),
        _ => None,
    }
}

fn as_bollinger(series: &IndicatorSeries) -> Option<&BollingerSeries> {
    match series {
        IndicatorSeries::Bollinger(bands) => Some(bands),
        _ => None,
    }
}

fn as_stochastic(series: &IndicatorSeries) -> Option<&StochasticSeries> {
    match series {
        IndicatorSeries::Stochastic(stoch) => Some(stoch),
        _ => None,
    }
}
