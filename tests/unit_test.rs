//! Unit tests for tradesim-rs modules

#[cfg(test)]
mod tests {
    use tradesim_rs::backtest::max_drawdown;
    use tradesim_rs::backtest::EquityPoint;
    use tradesim_rs::error::BacktestError;
    use tradesim_rs::indicators::{
        calculate_ema, calculate_rsi, calculate_sma, compute_indicators, IndicatorSpec,
    };
    use tradesim_rs::strategy::{Condition, ConditionRule};
    use tradesim_rs::data::{Candle, CandleSeries};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn daily_series(closes: &[f64]) -> CandleSeries {
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
    fn test_sma_known_values() {
        assert_eq!(
            calculate_sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3),
            vec![None, None, Some(2.0), Some(3.0), Some(4.0)]
        );
    }

    #[test]
    fn test_ema_seed_equals_sma_of_seed_window() {
        let values: Vec<f64> = (0..30).map(|i| 100.0 + ((i * 7) % 11) as f64).collect();
        for period in [3usize, 5, 10] {
            let ema = calculate_ema(&values, period);
            let sma = calculate_sma(&values, period);
            assert_eq!(ema[period - 1], sma[period - 1], "period {period}");
        }
    }

    #[test]
    fn test_rsi_stays_within_bounds() {
        let values: Vec<f64> = (0..200)
            .map(|i| 100.0 + (i as f64 * 0.31).sin() * 8.0 + (i as f64 * 0.07).cos() * 3.0)
            .collect();
        let rsi = calculate_rsi(&values, 14);
        for value in rsi.into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_indicator_series_align_with_input() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + ((i * 3) % 13) as f64).collect();
        let candles = daily_series(&closes);
        let specs = [
            IndicatorSpec::Sma { period: 10 },
            IndicatorSpec::Ema { period: 10 },
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
        let computed = compute_indicators(specs, &candles);
        assert_eq!(computed.len(), specs.len());
        for (spec, series) in &computed {
            assert_eq!(series.len(), closes.len(), "{spec} misaligned");
        }
    }

    #[test]
    fn test_indicator_deduplication() {
        let candles = daily_series(&(0..30).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let spec = IndicatorSpec::Ema { period: 12 };
        let computed = compute_indicators(vec![spec; 4], &candles);
        assert_eq!(computed.len(), 1);
    }

    #[test]
    fn test_incompatible_rule_is_rejected() {
        let rule = ConditionRule::new(
            IndicatorSpec::Bollinger {
                period: 20,
                std_dev: 2.0,
            },
            Condition::MacdCrossAboveSignal,
        );
        assert!(matches!(
            rule.validate(),
            Err(BacktestError::IncompatibleRule { .. })
        ));
    }

    #[test]
    fn test_macd_inverted_periods_rejected() {
        let rule = ConditionRule::new(
            IndicatorSpec::Macd {
                fast_period: 26,
                slow_period: 12,
                signal_period: 9,
            },
            Condition::MacdAboveZero,
        );
        assert!(matches!(
            rule.validate(),
            Err(BacktestError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_max_drawdown_peak_to_trough() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let curve: Vec<EquityPoint> = [1000.0, 1200.0, 900.0, 1100.0]
            .iter()
            .enumerate()
            .map(|(i, &equity)| EquityPoint {
                date: start + chrono::Duration::days(i as i64),
                equity,
            })
            .collect();
        let drawdown = max_drawdown(1000.0, &curve);
        assert!((drawdown - 25.0).abs() < 1e-9);
    }
}
