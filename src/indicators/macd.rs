// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD_t   = EMA(fast)_t - EMA(slow)_t
// signal_t = SMA(MACD, signal)_t
//
// The signal line only starts once `signal` consecutive MACD values exist, so
// its warm-up is the slow EMA's warm-up plus `signal - 1` rows.
// =============================================================================

use super::moving_average::rolling_mean;

/// Row-aligned MACD line and its moving-average signal line.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// Combine two precomputed EMA series into MACD plus its signal line.
pub fn calculate_macd(fast_ema: &[Option<f64>], slow_ema: &[Option<f64>], signal: usize) -> MacdSeries {
    let macd: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(slow_ema)
        .map(|(&fast, &slow)| Some(fast? - slow?))
        .collect();
    let signal = rolling_mean(&macd, signal);
    MacdSeries { macd, signal }
}
