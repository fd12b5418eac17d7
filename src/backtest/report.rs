//! Backtest report generation

use crate::backtest::BacktestResult;

/// Plain-text summary of a backtest result
#[derive(Debug)]
pub struct BacktestReport {
    result: BacktestResult,
}

impl BacktestReport {
    /// Create new report from result
    pub fn new(result: BacktestResult) -> Self {
        Self { result }
    }

    /// Format report as string
    pub fn format(&self) -> String {
        format!(
            r#"
Backtest Results
================
Initial Capital: ${:.2}
Final Capital: ${:.2}
Net Profit: ${:.2}
Number of Trades: {}
Winning Trades: {}
Losing Trades: {}
Win Rate: {:.2}%
Gross Profit: ${:.2}
Gross Loss: ${:.2}
Profit Factor: {}
Maximum Drawdown: {:.2}%
Sharpe Ratio: {:.2}
"#,
            self.result.initial_capital,
            self.result.final_capital,
            self.result.net_profit,
            self.result.total_trades,
            self.result.winning_trades,
            self.result.losing_trades,
            self.result.win_rate,
            self.result.gross_profit,
            self.result.gross_loss,
            format_profit_factor(self.result.profit_factor),
            self.result.max_drawdown,
            self.result.sharpe_ratio,
        )
    }

    /// Get result reference
    pub fn result(&self) -> &BacktestResult {
        &self.result
    }
}

fn format_profit_factor(value: f64) -> String {
    if value.is_infinite() {
        "inf".to_string()
    } else {
        format!("{value:.2}")
    }
}
