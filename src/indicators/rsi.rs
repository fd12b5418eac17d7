//! RSI (Relative Strength Index) indicator

/// Calculate RSI over a series of values using Wilder's smoothing.
///
/// The seed average gain/loss is the simple mean of the first `period`
/// deltas, so the first valid output sits at index `period`. Later entries
/// use `avg = (avg * (period - 1) + current) / period`.
///
/// When the average loss is zero the RS quotient degenerates: a positive
/// average gain maps to RSI 100, and a fully flat window maps to RSI 50.
pub fn calculate_rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || values.len() <= period {
        return vec![None; values.len()];
    }

    let mut results = vec![None; values.len()];

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = values[i] - values[i - 1];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss += -change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;
    results[period] = Some(rsi_from_averages(avg_gain, avg_loss));

    for i in period + 1..values.len() {
        let change = values[i] - values[i - 1];
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };
        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
        results[i] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    results
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss > 0.0 {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    } else if avg_gain > 0.0 {
        // no losses in the window: RS -> infinity
        100.0
    } else {
        // flat window: RS treated as 1
        50.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_warmup_and_bounds() {
        let values: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let result = calculate_rsi(&values, 14);
        assert_eq!(result.len(), values.len());
        assert!(result[..14].iter().all(|v| v.is_none()));
        for value in result[14..].iter() {
            let v = value.expect("post-warmup RSI must be present");
            assert!((0.0..=100.0).contains(&v), "RSI out of bounds: {v}");
        }
    }

    #[test]
    fn test_rsi_all_gains_is_100() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = calculate_rsi(&values, 3);
        assert_eq!(result[3], Some(100.0));
        assert_eq!(result[4], Some(100.0));
    }

    #[test]
    fn test_rsi_flat_series_is_50() {
        let values = vec![5.0; 6];
        let result = calculate_rsi(&values, 3);
        assert_eq!(result[3], Some(50.0));
        assert_eq!(result[5], Some(50.0));
    }

    #[test]
    fn test_rsi_wilder_smoothing() {
        let values = vec![10.0, 11.0, 10.0, 11.0];
        let result = calculate_rsi(&values, 2);
        // seed: avg gain 0.5, avg loss 0.5 -> RS 1 -> RSI 50
        assert_eq!(result[2], Some(50.0));
        // next: avg gain (0.5 + 1)/2 = 0.75, avg loss 0.25 -> RS 3 -> RSI 75
        assert_eq!(result[3], Some(75.0));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let result = calculate_rsi(&[1.0, 2.0, 3.0], 14);
        assert_eq!(result, vec![None, None, None]);
    }
}
