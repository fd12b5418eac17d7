//! Example: backtesting an RSI threshold strategy, long and short

use chrono::{TimeZone, Utc};
use tradesim_rs::backtest::{run_backtest, BacktestReport};
use tradesim_rs::data::{Candle, CandleSeries};
use tradesim_rs::indicators::IndicatorSpec;
use tradesim_rs::strategy::{Condition, ConditionRule, StrategyConfig};

/// Synthetic daily candles oscillating around a slow drift
fn create_test_candles(count: usize, base_price: f64) -> CandleSeries {
    let base_time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    CandleSeries::from_vec(
        (0..count)
            .map(|i| {
                let drift = i as f64 * 0.02;
                let swing = (i as f64 * 0.35).sin() * 6.0;
                let close = base_price + drift + swing;
                Candle::new(
                    base_time + chrono::Duration::days(i as i64),
                    close,
                    close + 1.5,
                    close - 1.5,
                    close,
                    1000.0,
                )
            })
            .collect(),
    )
}

fn rsi_rule(condition: Condition) -> ConditionRule {
    ConditionRule::new(IndicatorSpec::Rsi { period: 14 }, condition)
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("=== TradeSim-RS RSI Strategy Example ===\n");

    let candles = create_test_candles(500, 100.0);

    let config = StrategyConfig {
        name: "RSI Reversion".to_string(),
        long_enabled: true,
        short_enabled: true,
        long_entry_rules: vec![rsi_rule(Condition::CrossBelowThreshold { threshold: 30.0 })],
        long_exit_rules: vec![rsi_rule(Condition::CrossAboveThreshold { threshold: 70.0 })],
        short_entry_rules: vec![rsi_rule(Condition::CrossAboveThreshold { threshold: 70.0 })],
        short_exit_rules: vec![rsi_rule(Condition::CrossBelowThreshold { threshold: 30.0 })],
        stop_loss_pct: 5.0,
        take_profit_pct: 15.0,
        initial_capital: 10_000.0,
        position_size_pct: 10.0,
        ..StrategyConfig::default()
    };

    println!("Running backtest over {} candles...", candles.len());
    let result = run_backtest(&config, &candles)?;

    println!("\n=== Backtest Results ===");
    let report = BacktestReport::new(result);
    println!("{}", report.format());

    println!("=== Trades ===");
    for trade in &report.result().trades {
        println!(
            "{} {} entry {:.2} exit {:.2} profit {:.2} ({})",
            trade.entry_date.format("%Y-%m-%d"),
            trade.side,
            trade.entry_price,
            trade.exit_price,
            trade.profit,
            trade.exit_reason,
        );
    }

    Ok(())
}
