//! SMA (Simple Moving Average) indicator

/// Calculate SMA over a series of values.
///
/// The first `period - 1` entries are `None`. A series shorter than `period`
/// (or a zero period) yields an all-`None` result of the input length.
///
/// Maintains a running window sum so the cost stays O(n) regardless of the
/// period; MACD, Bollinger and Stochastic all build on this.
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }

    let mut results = vec![None; values.len()];
    let mut window_sum: f64 = values[..period].iter().sum();
    results[period - 1] = Some(window_sum / period as f64);

    for i in period..values.len() {
        window_sum += values[i] - values[i - period];
        results[i] = Some(window_sum / period as f64);
    }

    results
}

/// Calculate SMA over a series that may carry leading warm-up gaps.
///
/// The valid region of the input is assumed contiguous (which holds for
/// every indicator series in this crate); output gaps cover the input gaps
/// plus the SMA's own warm-up.
pub fn calculate_sma_gapped(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut results = vec![None; values.len()];
    let offset = match values.iter().position(|v| v.is_some()) {
        Some(offset) => offset,
        None => return results,
    };

    let compact: Vec<f64> = values[offset..].iter().filter_map(|v| *v).collect();
    for (j, value) in calculate_sma(&compact, period).into_iter().enumerate() {
        results[offset + j] = value;
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_known_values() {
        let result = calculate_sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(result, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_sma_alignment() {
        let values: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = calculate_sma(&values, 10);
        assert_eq!(result.len(), values.len());
        assert!(result[..9].iter().all(|v| v.is_none()));
        assert!(result[9..].iter().all(|v| v.is_some()));
    }

    #[test]
    fn test_sma_insufficient_data() {
        let result = calculate_sma(&[1.0, 2.0], 5);
        assert_eq!(result, vec![None, None]);
    }

    #[test]
    fn test_sma_gapped_realigns() {
        let values = vec![None, None, Some(1.0), Some(2.0), Some(3.0)];
        let result = calculate_sma_gapped(&values, 2);
        assert_eq!(result, vec![None, None, None, Some(1.5), Some(2.5)]);
    }
}
