//! Backtest performance metrics

use crate::backtest::position::{EquityPoint, Trade};

/// Trading days per year, used to annualize per-trade returns
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Scalar performance statistics of one run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsSummary {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub profit_factor: f64,
    pub net_profit: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
}

/// Compute the summary statistics of a finished run.
///
/// Zero trades produce an all-zero summary, never an error.
pub fn compute_metrics(
    trades: &[Trade],
    initial_capital: f64,
    equity: &[EquityPoint],
    candle_count: usize,
) -> MetricsSummary {
    if trades.is_empty() {
        return MetricsSummary::default();
    }

    let total_trades = trades.len();
    let winning_trades = trades.iter().filter(|t| t.profit > 0.0).count();
    let losing_trades = trades.iter().filter(|t| t.profit < 0.0).count();
    let win_rate = winning_trades as f64 / total_trades as f64 * 100.0;

    let gross_profit: f64 = trades
        .iter()
        .filter(|t| t.profit > 0.0)
        .map(|t| t.profit)
        .sum();
    let gross_loss: f64 = trades
        .iter()
        .filter(|t| t.profit < 0.0)
        .map(|t| -t.profit)
        .sum();

    let profit_factor = if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else if gross_profit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    MetricsSummary {
        total_trades,
        winning_trades,
        losing_trades,
        win_rate,
        gross_profit,
        gross_loss,
        profit_factor,
        net_profit: gross_profit - gross_loss,
        max_drawdown: max_drawdown(initial_capital, equity),
        sharpe_ratio: sharpe_ratio(trades, candle_count),
    }
}

/// Largest peak-to-trough percentage decline along the equity curve.
///
/// The running peak starts at the initial capital.
pub fn max_drawdown(initial_capital: f64, equity: &[EquityPoint]) -> f64 {
    let mut peak = initial_capital;
    let mut worst = 0.0;
    for point in equity {
        if point.equity > peak {
            peak = point.equity;
        }
        if peak > 0.0 {
            let drawdown = (peak - point.equity) / peak * 100.0;
            if drawdown > worst {
                worst = drawdown;
            }
        }
    }
    worst
}

/// Annualized Sharpe ratio over per-trade returns on committed capital,
/// scaled by the estimated number of trades per year. Risk-free rate zero.
fn sharpe_ratio(trades: &[Trade], candle_count: usize) -> f64 {
    if trades.is_empty() || candle_count == 0 {
        return 0.0;
    }

    let returns: Vec<f64> = trades
        .iter()
        .map(|t| {
            let committed = t.committed_capital();
            if committed > 0.0 {
                t.profit / committed
            } else {
                0.0
            }
        })
        .collect();

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return 0.0;
    }

    let years = candle_count as f64 / TRADING_DAYS_PER_YEAR;
    let trades_per_year = trades.len() as f64 / years;
    mean / std_dev * trades_per_year.sqrt()
}
