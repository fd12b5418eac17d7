//! Example: backtesting an SMA crossover strategy

use chrono::{TimeZone, Utc};
use tradesim_rs::backtest::{run_backtest, BacktestReport};
use tradesim_rs::data::{Candle, CandleSeries};
use tradesim_rs::indicators::IndicatorSpec;
use tradesim_rs::strategy::{Condition, ConditionRule, StrategyConfig};

/// Synthetic daily candles: a dip, a long rise, then a sell-off
fn create_test_candles() -> CandleSeries {
    let mut closes: Vec<f64> = (0..8).map(|i| 104.0 - i as f64 * 0.5).collect();
    closes.extend((0..60).map(|i| 100.0 + i as f64 * 0.6 + (i as f64 * 0.9).sin()));
    closes.extend((0..30).map(|i| 136.0 - i as f64 * 0.8));

    let base_time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    CandleSeries::from_vec(
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                Candle::new(
                    base_time + chrono::Duration::days(i as i64),
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    1000.0,
                )
            })
            .collect(),
    )
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("=== TradeSim-RS Backtest Example ===\n");

    println!("Creating test candle data...");
    let candles = create_test_candles();

    println!("Configuring SMA crossover strategy...");
    let config = StrategyConfig {
        name: "SMA Crossover".to_string(),
        long_enabled: true,
        short_enabled: false,
        long_entry_rules: vec![ConditionRule::new(
            IndicatorSpec::Sma { period: 5 },
            Condition::PriceCrossAbove,
        )],
        long_exit_rules: vec![ConditionRule::new(
            IndicatorSpec::Sma { period: 5 },
            Condition::PriceCrossBelow,
        )],
        short_entry_rules: Vec::new(),
        short_exit_rules: Vec::new(),
        stop_loss_pct: 5.0,
        take_profit_pct: 0.0,
        initial_capital: 10_000.0,
        position_size_pct: 100.0,
        ..StrategyConfig::default()
    };

    println!("Running backtest over {} candles...", candles.len());
    let result = run_backtest(&config, &candles)?;

    println!("\n=== Backtest Results ===");
    let report = BacktestReport::new(result);
    println!("{}", report.format());

    println!("=== Result as JSON ===");
    println!("{}", serde_json::to_string_pretty(report.result())?);

    Ok(())
}
