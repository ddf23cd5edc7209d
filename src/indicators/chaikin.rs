// =============================================================================
// Chaikin Oscillator
// =============================================================================
//
// Money-flow multiplier  MFM = ((C - L) - (H - C)) / (H - L)   (0 if H == L)
// Money-flow volume      MFV = MFM * volume
// Accumulation line      ADL_t = ADL_{t-1} + MFV_t
// Oscillator             EMA(fast, ADL) - EMA(slow, ADL)
//
// The EMAs use the same SMA-seeded recurrence as the price EMAs.
// =============================================================================

use super::moving_average::{defined, exponential_fold, rolling_mean};

/// Cumulative accumulation/distribution line, defined from row 0.
pub fn accumulation_distribution(high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Vec<f64> {
    (0..close.len())
        .scan(0.0, |adl, i| {
            let range = high[i] - low[i];
            let multiplier = if range == 0.0 {
                0.0
            } else {
                ((close[i] - low[i]) - (high[i] - close[i])) / range
            };
            *adl += multiplier * volume[i];
            Some(*adl)
        })
        .collect()
}

pub fn calculate_chaikin(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: &[f64],
    fast: usize,
    slow: usize,
) -> Vec<Option<f64>> {
    let adl = defined(&accumulation_distribution(high, low, close, volume));
    let ema = |look_back: usize| exponential_fold(&adl, &rolling_mean(&adl, look_back), look_back);
    let fast_ema = ema(fast);
    let slow_ema = ema(slow);

    fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(&f, &s)| Some(f? - s?))
        .collect()
}
