//! Slow Stochastic Oscillator

use crate::indicators::calculate_sma_gapped;

/// Stochastic output series, aligned 1:1 with the input
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticSeries {
    /// Slow %K: raw %K smoothed over `smoothing` bars
    pub k: Vec<Option<f64>>,
    /// %D: SMA of slow %K over `d_period` bars
    pub d: Vec<Option<f64>>,
}

/// Calculate the slow Stochastic Oscillator.
///
/// Raw `%K[i] = 100 * (close[i] - lowest low) / (highest high - lowest low)`
/// over the trailing `k_period` window. A zero-range window carries the
/// previous raw %K forward (50 when none exists yet) instead of dividing by
/// zero. The reported %K is the `smoothing`-bar SMA of the raw line; %D is
/// the `d_period`-bar SMA of that.
pub fn calculate_stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    k_period: usize,
    d_period: usize,
    smoothing: usize,
) -> StochasticSeries {
    let len = closes.len();
    let mut raw_k = vec![None; len];

    if k_period > 0 && len >= k_period {
        let mut prev_raw = None;
        for i in k_period - 1..len {
            let window = i + 1 - k_period..=i;
            let lowest = lows[window.clone()]
                .iter()
                .cloned()
                .fold(f64::INFINITY, f64::min);
            let highest = highs[window].iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let range = highest - lowest;

            let value = if range > 0.0 {
                100.0 * (closes[i] - lowest) / range
            } else {
                prev_raw.unwrap_or(50.0)
            };
            raw_k[i] = Some(value);
            prev_raw = Some(value);
        }
    }

    let k = calculate_sma_gapped(&raw_k, smoothing);
    let d = calculate_sma_gapped(&k, d_period);

    StochasticSeries { k, d }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stochastic_raw_value() {
        let closes = vec![1.0, 2.0, 3.0];
        let result = calculate_stochastic(&closes, &closes, &closes, 3, 2, 1);
        // window [1..3]: close at the top of the range
        assert_eq!(result.k[2], Some(100.0));
        assert_eq!(result.d[2], None);
    }

    #[test]
    fn test_stochastic_zero_range_carries_forward() {
        let flat = vec![5.0; 6];
        let result = calculate_stochastic(&flat, &flat, &flat, 3, 2, 1);
        // no previous raw %K on the first window: defaults to 50
        assert_eq!(result.k[2], Some(50.0));
        assert_eq!(result.k[5], Some(50.0));
    }

    #[test]
    fn test_stochastic_zero_range_after_movement() {
        let highs = vec![2.0, 2.0, 2.0, 3.0, 3.0, 3.0];
        let lows = vec![1.0, 1.0, 1.0, 3.0, 3.0, 3.0];
        let closes = vec![1.5, 1.5, 2.0, 3.0, 3.0, 3.0];
        let result = calculate_stochastic(&highs, &lows, &closes, 3, 2, 1);
        // window [0..=2]: range 1..2, close 2.0 -> 100
        assert_eq!(result.k[2], Some(100.0));
        // window [3..=5]: flat at 3.0 -> carries the previous raw %K
        assert_eq!(result.k[5], result.k[4]);
    }

    #[test]
    fn test_stochastic_warmup_stacking() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 5) as f64).collect();
        let result = calculate_stochastic(&closes, &closes, &closes, 14, 3, 3);
        assert_eq!(result.k.len(), 30);
        // raw valid from 13, smoothed from 15, %D from 17
        assert!(result.k[..15].iter().all(|v| v.is_none()));
        assert!(result.k[15].is_some());
        assert!(result.d[..17].iter().all(|v| v.is_none()));
        assert!(result.d[17].is_some());
        for value in result.k.iter().chain(result.d.iter()).flatten() {
            assert!((0.0..=100.0).contains(value));
        }
    }

    #[test]
    fn test_stochastic_insufficient_data() {
        let closes = vec![1.0, 2.0];
        let result = calculate_stochastic(&closes, &closes, &closes, 14, 3, 3);
        assert!(result.k.iter().all(|v| v.is_none()));
        assert!(result.d.iter().all(|v| v.is_none()));
    }
}
