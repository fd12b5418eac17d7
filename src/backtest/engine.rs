//! Backtesting engine
//!
//! One sequential pass over the candle series drives a FLAT/LONG/SHORT
//! state machine. Exits are checked before entries on every candle, in
//! strict priority: stop-loss, take-profit, indicator exit, end of data.

use crate::backtest::metrics::compute_metrics;
use crate::backtest::position::{EquityPoint, ExitReason, OpenPosition, PositionSide, Trade};
use crate::data::{Candle, CandleSeries};
use crate::error::Result;
use crate::indicators::{compute_indicators, IndicatorSeries, IndicatorSpec};
use crate::strategy::{evaluate_rules, CombineMode, StrategyConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Backtest result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Number of closed trades
    pub total_trades: usize,
    /// Trades with positive profit
    pub winning_trades: usize,
    /// Trades with negative profit
    pub losing_trades: usize,
    /// Winning trades as percent of total
    pub win_rate: f64,
    /// Sum of positive trade profits
    pub gross_profit: f64,
    /// Sum of absolute negative trade profits
    pub gross_loss: f64,
    /// Gross profit over gross loss (infinite without losses)
    pub profit_factor: f64,
    /// Gross profit minus gross loss
    pub net_profit: f64,
    /// Largest peak-to-trough equity decline, percent
    pub max_drawdown: f64,
    /// Annualized Sharpe ratio over per-trade returns
    pub sharpe_ratio: f64,
    /// Closed trades, in close order
    pub trades: Vec<Trade>,
    /// Equity curve, one point per calendar date visited
    pub equity_data: Vec<EquityPoint>,
    /// Capital after the final candle
    pub final_capital: f64,
    /// Capital before the first candle
    pub initial_capital: f64,
}

/// Mutable state threaded through the candle walk
#[derive(Debug)]
struct SimulationState {
    capital: f64,
    position: Option<OpenPosition>,
    trades: Vec<Trade>,
    equity: Vec<EquityPoint>,
}

/// Backtesting engine
pub struct BacktestEngine {
    config: StrategyConfig,
}

impl BacktestEngine {
    /// Create a new engine for one strategy configuration
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    /// Get the strategy configuration
    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Run the simulation over a candle series.
    ///
    /// Validates the configuration and the input before the loop starts;
    /// after that the run always completes. Indicator warm-up gaps only
    /// degrade rule evaluation locally.
    pub fn run(&self, candles: &CandleSeries) -> Result<BacktestResult> {
        self.config.validate()?;
        candles.validate(2)?;

        let indicators =
            compute_indicators(self.config.all_rules().map(|rule| rule.indicator), candles);
        info!(
            strategy = %self.config.name,
            candles = candles.len(),
            indicators = indicators.len(),
            "starting backtest"
        );

        let mut state = SimulationState {
            capital: self.config.initial_capital,
            position: None,
            trades: Vec::new(),
            equity: Vec::new(),
        };

        for (index, candle) in candles.candles().iter().enumerate() {
            self.step(index, candle, candles, &indicators, &mut state);
        }

        let summary = compute_metrics(
            &state.trades,
            self.config.initial_capital,
            &state.equity,
            candles.len(),
        );
        info!(
            trades = summary.total_trades,
            net_profit = summary.net_profit,
            final_capital = state.capital,
            "backtest finished"
        );

        Ok(BacktestResult {
            total_trades: summary.total_trades,
            winning_trades: summary.winning_trades,
            losing_trades: summary.losing_trades,
            win_rate: summary.win_rate,
            gross_profit: summary.gross_profit,
            gross_loss: summary.gross_loss,
            profit_factor: summary.profit_factor,
            net_profit: summary.net_profit,
            max_drawdown: summary.max_drawdown,
            sharpe_ratio: summary.sharpe_ratio,
            trades: state.trades,
            equity_data: state.equity,
            final_capital: state.capital,
            initial_capital: self.config.initial_capital,
        })
    }

    /// Process one candle: exit check, entry check, equity update
    fn step(
        &self,
        index: usize,
        candle: &Candle,
        candles: &CandleSeries,
        indicators: &HashMap<IndicatorSpec, IndicatorSeries>,
        state: &mut SimulationState,
    ) {
        let is_last = index + 1 == candles.len();
        let mut trade_closed = false;

        if let Some(position) = state.position.take() {
            match self.check_exit(&position, index, is_last, candle, candles, indicators) {
                Some((exit_price, reason)) => {
                    let profit = position.profit(exit_price);
                    state.capital += profit;
                    debug!(
                        side = %position.side,
                        entry = position.entry_price,
                        exit = exit_price,
                        profit,
                        reason = %reason,
                        "closing position"
                    );
                    state
                        .trades
                        .push(position.into_trade(exit_price, candle.date, reason));
                    trade_closed = true;
                }
                None => state.position = Some(position),
            }
        }

        // an entry on the final candle could never be closed
        if state.position.is_none() && !is_last && state.capital > 0.0 {
            if let Some(side) = self.entry_signal(index, candles, indicators) {
                let position = OpenPosition::open(
                    side,
                    candle.close,
                    index,
                    candle.date,
                    state.capital,
                    self.config.position_size_pct,
                );
                debug!(
                    side = %side,
                    entry = candle.close,
                    shares = position.share_count,
                    "opening position"
                );
                state.position = Some(position);
            }
        }

        let date = candle.date.date_naive();
        if trade_closed {
            match state.equity.last_mut() {
                Some(point) if point.date == date => point.equity = state.capital,
                _ => state.equity.push(EquityPoint {
                    date,
                    equity: state.capital,
                }),
            }
        } else if state.equity.last().map(|point| point.date) != Some(date) {
            state.equity.push(EquityPoint {
                date,
                equity: state.capital,
            });
        }
    }

    /// Resolve the exit for an open position on this candle, if any.
    ///
    /// The reasons are mutually exclusive and checked in priority order:
    /// the stop-loss shadows the take-profit, which shadows indicator
    /// exits. Stop and target fill at their trigger prices, the rest at
    /// the close.
    fn check_exit(
        &self,
        position: &OpenPosition,
        index: usize,
        is_last: bool,
        candle: &Candle,
        candles: &CandleSeries,
        indicators: &HashMap<IndicatorSpec, IndicatorSeries>,
    ) -> Option<(f64, ExitReason)> {
        if let Some(stop) = position.stop_hit(candle, self.config.stop_loss_pct) {
            return Some((stop, ExitReason::StopLoss));
        }
        if let Some(target) = position.target_hit(candle, self.config.take_profit_pct) {
            return Some((target, ExitReason::TakeProfit));
        }

        let exit_rules = match position.side {
            PositionSide::Long => &self.config.long_exit_rules,
            PositionSide::Short => &self.config.short_exit_rules,
        };
        if evaluate_rules(exit_rules, CombineMode::Any, index, candles, indicators) {
            return Some((candle.close, ExitReason::IndicatorExit));
        }

        if is_last {
            return Some((candle.close, ExitReason::EndOfData));
        }
        None
    }

    /// The side to open on this candle, if any. Long shadows short.
    fn entry_signal(
        &self,
        index: usize,
        candles: &CandleSeries,
        indicators: &HashMap<IndicatorSpec, IndicatorSeries>,
    ) -> Option<PositionSide> {
        if self.config.long_enabled
            && evaluate_rules(
                &self.config.long_entry_rules,
                CombineMode::All,
                index,
                candles,
                indicators,
            )
        {
            return Some(PositionSide::Long);
        }
        if self.config.short_enabled
            && evaluate_rules(
                &self.config.short_entry_rules,
                CombineMode::All,
                index,
                candles,
                indicators,
            )
        {
            return Some(PositionSide::Short);
        }
        None
    }
}

/// Run a backtest of `config` over `candles`
pub fn run_backtest(config: &StrategyConfig, candles: &CandleSeries) -> Result<BacktestResult> {
    BacktestEngine::new(config.clone()).run(candles)
}
