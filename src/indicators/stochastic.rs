// =============================================================================
// Stochastic Oscillator
// =============================================================================
//
// %K_t = (close_t - lowest_low) / (highest_high - lowest_low) * 100
//        over the last `look_back` rows
// %D_t = SMA(%K, signal)
//
// A flat window (highest == lowest) reads 50.
// =============================================================================

use super::moving_average::rolling_mean;

#[derive(Debug, Clone, PartialEq)]
pub struct StochasticSeries {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

pub fn calculate_stochastic(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    look_back: usize,
    signal: usize,
) -> StochasticSeries {
    let k: Vec<Option<f64>> = (0..close.len())
        .map(|i| {
            if look_back == 0 || i + 1 < look_back {
                return None;
            }
            let start = i + 1 - look_back;
            let highest = high[start..=i].iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let lowest = low[start..=i].iter().copied().fold(f64::INFINITY, f64::min);
            let range = highest - lowest;
            Some(if range == 0.0 {
                50.0
            } else {
                (close[i] - lowest) / range * 100.0
            })
        })
        .collect();
    let d = rolling_mean(&k, signal);
    StochasticSeries { k, d }
}
