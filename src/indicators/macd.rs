//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::calculate_ema;

/// MACD output series, aligned 1:1 with the input
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    /// MACD line: EMA(fast) - EMA(slow), valid from index `slow - 1`
    pub macd: Vec<Option<f64>>,
    /// Signal line: EMA of the valid MACD entries, realigned to the input
    pub signal: Vec<Option<f64>>,
    /// Histogram: MACD - signal wherever both are present
    pub histogram: Vec<Option<f64>>,
}

/// Calculate MACD over a series of values.
///
/// The signal line is the EMA of the MACD line restricted to its valid
/// entries, then placed back at the original indices, so its warm-up stacks
/// on top of the slow EMA's.
pub fn calculate_macd(
    values: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdSeries {
    let fast_ema = calculate_ema(values, fast_period);
    let slow_ema = calculate_ema(values, slow_period);

    let macd: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let mut signal = vec![None; values.len()];
    if let Some(offset) = macd.iter().position(|v| v.is_some()) {
        let compact: Vec<f64> = macd[offset..].iter().filter_map(|v| *v).collect();
        for (j, value) in calculate_ema(&compact, signal_period).into_iter().enumerate() {
            signal[offset + j] = value;
        }
    }

    let histogram: Vec<Option<f64>> = macd
        .iter()
        .zip(signal.iter())
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        })
        .collect();

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_alignment() {
        let values: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 0.5).collect();
        let result = calculate_macd(&values, 12, 26, 9);
        assert_eq!(result.macd.len(), values.len());
        assert_eq!(result.signal.len(), values.len());
        assert_eq!(result.histogram.len(), values.len());
        // MACD valid from slow - 1, signal stacks the signal warm-up on top
        assert!(result.macd[..25].iter().all(|v| v.is_none()));
        assert!(result.macd[25].is_some());
        assert!(result.signal[..33].iter().all(|v| v.is_none()));
        assert!(result.signal[33].is_some());
        assert!(result.histogram[33].is_some());
    }

    #[test]
    fn test_macd_small_periods() {
        let values: Vec<f64> = (1..=8).map(|i| i as f64).collect();
        let result = calculate_macd(&values, 2, 3, 2);
        // on a linear ramp both EMAs converge to a constant distance
        assert_eq!(result.macd[2], Some(0.5));
        assert_eq!(result.signal[2], None);
        assert_eq!(result.signal[3], Some(0.5));
        assert_eq!(result.histogram[3], Some(0.0));
    }

    #[test]
    fn test_macd_insufficient_data() {
        let result = calculate_macd(&[1.0, 2.0, 3.0], 12, 26, 9);
        assert!(result.macd.iter().all(|v| v.is_none()));
        assert!(result.signal.iter().all(|v| v.is_none()));
        assert!(result.histogram.iter().all(|v| v.is_none()));
    }
}
