//! Strategy configuration

use crate::error::{BacktestError, Result};
use crate::indicators::IndicatorSpec;
use crate::strategy::{Condition, ConditionRule};
use serde::{Deserialize, Serialize};

/// Strategy configuration
///
/// Percentages are in percent units (10 means 10%). A `stop_loss_pct` or
/// `take_profit_pct` of 0 disables that control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Strategy name
    pub name: String,
    /// Allow long positions
    pub long_enabled: bool,
    /// Allow short positions
    pub short_enabled: bool,
    /// Long entry rules, combined with AND
    pub long_entry_rules: Vec<ConditionRule>,
    /// Long exit rules, combined with OR
    pub long_exit_rules: Vec<ConditionRule>,
    /// Short entry rules, combined with AND
    pub short_entry_rules: Vec<ConditionRule>,
    /// Short exit rules, combined with OR
    pub short_exit_rules: Vec<ConditionRule>,
    /// Stop loss as percent of entry price (0 disables)
    pub stop_loss_pct: f64,
    /// Take profit as percent of entry price (0 disables)
    pub take_profit_pct: f64,
    /// Starting capital
    pub initial_capital: f64,
    /// Percent of current capital committed per trade
    pub position_size_pct: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            name: "My Trading Strategy".to_string(),
            long_enabled: true,
            short_enabled: true,
            long_entry_rules: vec![ConditionRule::new(
                IndicatorSpec::Sma { period: 20 },
                Condition::PriceAbove,
            )],
            long_exit_rules: vec![ConditionRule::new(
                IndicatorSpec::Sma { period: 50 },
                Condition::PriceBelow,
            )],
            short_entry_rules: vec![ConditionRule::new(
                IndicatorSpec::Rsi { period: 14 },
                Condition::AboveThreshold { threshold: 70.0 },
            )],
            short_exit_rules: vec![ConditionRule::new(
                IndicatorSpec::Rsi { period: 14 },
                Condition::BelowThreshold { threshold: 30.0 },
            )],
            stop_loss_pct: 5.0,
            take_profit_pct: 15.0,
            initial_capital: 10_000.0,
            position_size_pct: 10.0,
        }
    }
}

impl StrategyConfig {
    /// Iterate over every rule of the strategy
    pub fn all_rules(&self) -> impl Iterator<Item = &ConditionRule> {
        self.long_entry_rules
            .iter()
            .chain(self.long_exit_rules.iter())
            .chain(self.short_entry_rules.iter())
            .chain(self.short_exit_rules.iter())
    }

    /// Check the configuration invariants; called before a run starts
    pub fn validate(&self) -> Result<()> {
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(BacktestError::InvalidConfig(
                "initial_capital must be positive".to_string(),
            ));
        }
        if !self.position_size_pct.is_finite() || self.position_size_pct <= 0.0 {
            return Err(BacktestError::InvalidConfig(
                "position_size_pct must be positive".to_string(),
            ));
        }
        if !self.stop_loss_pct.is_finite() || self.stop_loss_pct < 0.0 {
            return Err(BacktestError::InvalidConfig(
                "stop_loss_pct must be zero or positive".to_string(),
            ));
        }
        if !self.take_profit_pct.is_finite() || self.take_profit_pct < 0.0 {
            return Err(BacktestError::InvalidConfig(
                "take_profit_pct must be zero or positive".to_string(),
            ));
        }
        for rule in self.all_rules() {
            rule.validate()?;
        }
        Ok(())
    }
}
