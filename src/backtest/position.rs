//! Position lifecycle types

use crate::data::Candle;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Position side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSide {
    Long,
    Short,
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionSide::Long => f.write_str("LONG"),
            PositionSide::Short => f.write_str("SHORT"),
        }
    }
}

/// Why a position was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    IndicatorExit,
    EndOfData,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::StopLoss => f.write_str("StopLoss"),
            ExitReason::TakeProfit => f.write_str("TakeProfit"),
            ExitReason::IndicatorExit => f.write_str("IndicatorExit"),
            ExitReason::EndOfData => f.write_str("EndOfData"),
        }
    }
}

/// State of the one open position; exists only while the engine is not flat
#[derive(Debug, Clone)]
pub struct OpenPosition {
    pub side: PositionSide,
    pub entry_price: f64,
    pub entry_index: usize,
    pub entry_date: DateTime<Utc>,
    pub share_count: f64,
    pub capital_at_entry: f64,
}

impl OpenPosition {
    /// Open a position, committing `position_size_pct` percent of capital
    pub fn open(
        side: PositionSide,
        entry_price: f64,
        entry_index: usize,
        entry_date: DateTime<Utc>,
        capital: f64,
        position_size_pct: f64,
    ) -> Self {
        let position_value = capital * position_size_pct / 100.0;
        Self {
            side,
            entry_price,
            entry_index,
            entry_date,
            share_count: position_value / entry_price,
            capital_at_entry: capital,
        }
    }

    /// The stop-loss trigger price for this position
    pub fn stop_price(&self, stop_loss_pct: f64) -> f64 {
        match self.side {
            PositionSide::Long => self.entry_price * (1.0 - stop_loss_pct / 100.0),
            PositionSide::Short => self.entry_price * (1.0 + stop_loss_pct / 100.0),
        }
    }

    /// The take-profit trigger price for this position
    pub fn target_price(&self, take_profit_pct: f64) -> f64 {
        match self.side {
            PositionSide::Long => self.entry_price * (1.0 + take_profit_pct / 100.0),
            PositionSide::Short => self.entry_price * (1.0 - take_profit_pct / 100.0),
        }
    }

    /// Fill price if the candle touched the stop, `None` otherwise.
    /// A zero percentage disables the control.
    pub fn stop_hit(&self, candle: &Candle, stop_loss_pct: f64) -> Option<f64> {
        if stop_loss_pct <= 0.0 {
            return None;
        }
        let stop = self.stop_price(stop_loss_pct);
        let hit = match self.side {
            PositionSide::Long => candle.low <= stop,
            PositionSide::Short => candle.high >= stop,
        };
        hit.then_some(stop)
    }

    /// Fill price if the candle touched the target, `None` otherwise.
    /// A zero percentage disables the control.
    pub fn target_hit(&self, candle: &Candle, take_profit_pct: f64) -> Option<f64> {
        if take_profit_pct <= 0.0 {
            return None;
        }
        let target = self.target_price(take_profit_pct);
        let hit = match self.side {
            PositionSide::Long => candle.high >= target,
            PositionSide::Short => candle.low <= target,
        };
        hit.then_some(target)
    }

    /// Realized profit when closing at `exit_price`
    pub fn profit(&self, exit_price: f64) -> f64 {
        match self.side {
            PositionSide::Long => (exit_price - self.entry_price) * self.share_count,
            PositionSide::Short => (self.entry_price - exit_price) * self.share_count,
        }
    }

    /// Close the position into an immutable trade record
    pub fn into_trade(self, exit_price: f64, exit_date: DateTime<Utc>, reason: ExitReason) -> Trade {
        let profit = self.profit(exit_price);
        Trade {
            id: Uuid::new_v4(),
            side: self.side,
            entry_price: self.entry_price,
            exit_price,
            entry_date: self.entry_date,
            exit_date,
            profit,
            exit_reason: reason,
            share_count: self.share_count,
        }
    }
}

/// Immutable record of one closed trade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: Uuid,
    pub side: PositionSide,
    pub entry_price: f64,
    pub exit_price: f64,
    pub entry_date: DateTime<Utc>,
    pub exit_date: DateTime<Utc>,
    pub profit: f64,
    pub exit_reason: ExitReason,
    pub share_count: f64,
}

impl Trade {
    /// Capital that was committed at entry
    pub fn committed_capital(&self) -> f64 {
        self.entry_price * self.share_count
    }
}

/// One point of the equity curve, per calendar date visited
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}
