// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (rolling mean of the typical price),
// an upper band (middle + 2σ) and a lower band (middle - 2σ), where σ is the
// rolling *sample* standard deviation (n - 1 denominator) over the same window.
//
// Typical price: TP = (High + Low + Close) / 3
// =============================================================================

use super::moving_average::{defined, rolling_mean};

/// Band offset in standard deviations.
pub const BAND_WIDTH_STD: f64 = 2.0;

/// Row-aligned Bollinger output.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub middle: Vec<Option<f64>>,
    pub std: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
}

/// Typical price per row. Only lives for the duration of one calculation.
pub fn typical_price(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    high.iter()
        .zip(low)
        .zip(close)
        .map(|((h, l), c)| (h + l + c) / 3.0)
        .collect()
}

/// Rolling sample standard deviation; rows before `look_back - 1` are `None`.
///
/// `look_back` must be at least 2, otherwise every row is `None`.
pub fn rolling_sample_std(values: &[f64], look_back: usize) -> Vec<Option<f64>> {
    if look_back < 2 {
        return vec![None; values.len()];
    }
    let n = look_back as f64;

    (0..values.len())
        .map(|i| {
            if i + 1 < look_back {
                return None;
            }
            let window = &values[i + 1 - look_back..=i];
            let mean = window.iter().sum::<f64>() / n;
            let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
            Some(variance.sqrt())
        })
        .collect()
}

/// Calculate Bollinger Bands over the typical price.
///
/// All four series share the same warm-up: rows `< look_back - 1` are `None`.
pub fn calculate_bollinger(high: &[f64], low: &[f64], close: &[f64], look_back: usize) -> BollingerSeries {
    let tp = typical_price(high, low, close);
    let middle = rolling_mean(&defined(&tp), look_back);
    let std = rolling_sample_std(&tp, look_back);

    let band = |sign: f64| -> Vec<Option<f64>> {
        middle
            .iter()
            .zip(&std)
            .map(|(&m, &s)| Some(m? + sign * BAND_WIDTH_STD * s?))
            .collect()
    };
    let lower = band(-1.0);
    let upper = band(1.0);

    BollingerSeries {
        middle,
        std,
        lower,
        upper,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, &closes, &closes, 20);
        assert!(bb.middle[..19].iter().all(Option::is_none));
        let (upper, middle, lower) = (bb.upper[19].unwrap(), bb.middle[19].unwrap(), bb.lower[19].unwrap());
        assert!(upper > middle);
        assert!(lower < middle);
        assert!((middle - 10.5).abs() < 1e-10);
    }

    #[test]
    fn bollinger_insufficient_data() {
        let closes = vec![1.0, 2.0, 3.0];
        let bb = calculate_bollinger(&closes, &closes, &closes, 20);
        assert!(bb.upper.iter().chain(&bb.lower).all(Option::is_none));
    }

    #[test]
    fn bollinger_flat() {
        let closes = vec![100.0; 20];
        let bb = calculate_bollinger(&closes, &closes, &closes, 5);
        for i in 4..20 {
            assert!(bb.std[i].unwrap().abs() < 1e-10);
            assert!((bb.upper[i].unwrap() - 100.0).abs() < 1e-10);
            assert!((bb.lower[i].unwrap() - 100.0).abs() < 1e-10);
        }
    }

    #[test]
    fn std_uses_sample_denominator() {
        // [2, 4, 4, 4, 5, 5, 7, 9]: population σ = 2, sample σ = sqrt(32/7).
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let std = rolling_sample_std(&values, 8);
        assert!((std[7].unwrap() - (32.0_f64 / 7.0).sqrt()).abs() < 1e-10);
    }

    #[test]
    fn typical_price_averages_hlc() {
        let tp = typical_price(&[12.0], &[6.0], &[9.0]);
        assert!((tp[0] - 9.0).abs() < 1e-10);
    }

    #[test]
    fn band_spread_is_four_sigma() {
        let high = [11.0, 12.5, 12.0, 14.0, 13.5, 15.0, 14.2, 16.0];
        let low = [9.0, 10.0, 10.5, 11.0, 12.0, 12.5, 13.0, 13.1];
        let close = [10.0, 12.0, 11.0, 13.5, 12.2, 14.8, 13.3, 15.7];
        let bb = calculate_bollinger(&high, &low, &close, 3);
        for i in 2..8 {
            let spread = bb.upper[i].unwrap() - bb.lower[i].unwrap();
            assert!((spread - 4.0 * bb.std[i].unwrap()).abs() < 1e-9);
        }
    }
}
