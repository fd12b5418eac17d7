//! Condition rule descriptors
//!
//! A rule pairs an indicator spec with a condition. The condition variants
//! form closed families; which family applies depends on the indicator
//! kind, checked before the simulation starts.

use crate::error::{BacktestError, Result};
use crate::indicators::IndicatorSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A boolean condition over indicator and price values at one candle.
///
/// Threshold-bearing variants carry the threshold explicitly; there is no
/// indicator-level overbought/oversold fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    // close vs a moving-average line (SMA, EMA)
    PriceAbove,
    PriceBelow,
    PriceCrossAbove,
    PriceCrossBelow,
    // oscillator line vs a fixed threshold (RSI, Stochastic %K)
    AboveThreshold { threshold: f64 },
    BelowThreshold { threshold: f64 },
    CrossAboveThreshold { threshold: f64 },
    CrossBelowThreshold { threshold: f64 },
    // MACD line vs its signal line
    MacdAboveSignal,
    MacdBelowSignal,
    MacdCrossAboveSignal,
    MacdCrossBelowSignal,
    // MACD line vs the zero axis
    MacdAboveZero,
    MacdBelowZero,
    MacdCrossAboveZero,
    MacdCrossBelowZero,
    // close vs the Bollinger bands
    PriceAboveUpperBand,
    PriceBelowLowerBand,
    PriceCrossAboveUpperBand,
    PriceCrossBelowLowerBand,
    // slow %K vs %D
    KCrossAboveD,
    KCrossBelowD,
}

impl Condition {
    /// Whether this condition can be evaluated against the indicator kind
    pub fn applies_to(&self, indicator: &IndicatorSpec) -> bool {
        use Condition::*;
        match self {
            PriceAbove | PriceBelow | PriceCrossAbove | PriceCrossBelow => matches!(
                indicator,
                IndicatorSpec::Sma { .. } | IndicatorSpec::Ema { .. }
            ),
            AboveThreshold { .. }
            | BelowThreshold { .. }
            | CrossAboveThreshold { .. }
            | CrossBelowThreshold { .. } => matches!(
                indicator,
                IndicatorSpec::Rsi { .. } | IndicatorSpec::Stochastic { .. }
            ),
            MacdAboveSignal | MacdBelowSignal | MacdCrossAboveSignal | MacdCrossBelowSignal
            | MacdAboveZero | MacdBelowZero | MacdCrossAboveZero | MacdCrossBelowZero => {
                matches!(indicator, IndicatorSpec::Macd { .. })
            }
            PriceAboveUpperBand
            | PriceBelowLowerBand
            | PriceCrossAboveUpperBand
            | PriceCrossBelowLowerBand => matches!(indicator, IndicatorSpec::Bollinger { .. }),
            KCrossAboveD | KCrossBelowD => matches!(indicator, IndicatorSpec::Stochastic { .. }),
        }
    }

    /// Short name used in logs and error messages
    pub fn name(&self) -> &'static str {
        use Condition::*;
        match self {
            PriceAbove => "price_above",
            PriceBelow => "price_below",
            PriceCrossAbove => "price_cross_above",
            PriceCrossBelow => "price_cross_below",
            AboveThreshold { .. } => "above_threshold",
            BelowThreshold { .. } => "below_threshold",
            CrossAboveThreshold { .. } => "cross_above_threshold",
            CrossBelowThreshold { .. } => "cross_below_threshold",
            MacdAboveSignal => "macd_above_signal",
            MacdBelowSignal => "macd_below_signal",
            MacdCrossAboveSignal => "macd_cross_above_signal",
            MacdCrossBelowSignal => "macd_cross_below_signal",
            MacdAboveZero => "macd_above_zero",
            MacdBelowZero => "macd_below_zero",
            MacdCrossAboveZero => "macd_cross_above_zero",
            MacdCrossBelowZero => "macd_cross_below_zero",
            PriceAboveUpperBand => "price_above_upper_band",
            PriceBelowLowerBand => "price_below_lower_band",
            PriceCrossAboveUpperBand => "price_cross_above_upper_band",
            PriceCrossBelowLowerBand => "price_cross_below_lower_band",
            KCrossAboveD => "k_cross_above_d",
            KCrossBelowD => "k_cross_below_d",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry or exit rule of a strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionRule {
    pub indicator: IndicatorSpec,
    pub condition: Condition,
}

impl ConditionRule {
    /// Create a new rule
    pub fn new(indicator: IndicatorSpec, condition: Condition) -> Self {
        Self {
            indicator,
            condition,
        }
    }

    /// Check indicator parameters and rule/indicator compatibility
    pub fn validate(&self) -> Result<()> {
        self.indicator.validate()?;
        if !self.condition.applies_to(&self.indicator) {
            return Err(BacktestError::IncompatibleRule {
                condition: self.condition.to_string(),
                indicator: self.indicator.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_family_compatibility() {
        let sma = IndicatorSpec::Sma { period: 20 };
        let rsi = IndicatorSpec::Rsi { period: 14 };
        let macd = IndicatorSpec::Macd {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        };

        assert!(ConditionRule::new(sma, Condition::PriceCrossAbove)
            .validate()
            .is_ok());
        assert!(
            ConditionRule::new(rsi, Condition::AboveThreshold { threshold: 70.0 })
                .validate()
                .is_ok()
        );
        assert!(ConditionRule::new(macd, Condition::MacdCrossAboveSignal)
            .validate()
            .is_ok());

        // a threshold rule cannot read a moving average
        assert!(matches!(
            ConditionRule::new(sma, Condition::AboveThreshold { threshold: 70.0 }).validate(),
            Err(BacktestError::IncompatibleRule { .. })
        ));
    }

    #[test]
    fn test_macd_periods_validated() {
        let inverted = IndicatorSpec::Macd {
            fast_period: 26,
            slow_period: 12,
            signal_period: 9,
        };
        assert!(matches!(
            ConditionRule::new(inverted, Condition::MacdAboveZero).validate(),
            Err(BacktestError::InvalidConfig(_))
        ));
    }
}
