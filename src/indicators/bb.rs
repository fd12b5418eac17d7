//! Bollinger Bands indicator

use crate::indicators::calculate_sma;

/// Bollinger Bands output series, aligned 1:1 with the input
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    /// Middle band: SMA(period)
    pub middle: Vec<Option<f64>>,
    /// Upper band: middle + sigma * std_dev
    pub upper: Vec<Option<f64>>,
    /// Lower band: middle - sigma * std_dev
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands over a series of values.
///
/// Sigma is the population standard deviation of each trailing window,
/// tracked with running sums of values and squares so the whole computation
/// stays O(n).
pub fn calculate_bollinger(values: &[f64], period: usize, std_dev: f64) -> BollingerSeries {
    let middle = calculate_sma(values, period);
    let mut upper = vec![None; values.len()];
    let mut lower = vec![None; values.len()];

    if period > 0 && values.len() >= period {
        let mut window_sq_sum: f64 = values[..period].iter().map(|v| v * v).sum();
        for i in period - 1..values.len() {
            if i >= period {
                window_sq_sum += values[i] * values[i] - values[i - period] * values[i - period];
            }
            let mean = middle[i].expect("middle band present inside valid region");
            // rounding can push the variance a hair below zero on flat windows
            let variance = (window_sq_sum / period as f64 - mean * mean).max(0.0);
            let sigma = variance.sqrt();
            upper[i] = Some(mean + sigma * std_dev);
            lower[i] = Some(mean - sigma * std_dev);
        }
    }

    BollingerSeries {
        middle,
        upper,
        lower,
    }
}
