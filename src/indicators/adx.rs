// =============================================================================
// Average Directional Index (ADX)
// =============================================================================
//
// Trend strength, direction-agnostic.
//
//   +DM / -DM   the larger of the up move and down move, zero otherwise
//   TR          max(H - L, |H - C_prev|, |L - C_prev|)
//   +DI / -DI   Wilder-smoothed DM over Wilder-smoothed TR, times 100
//   DX          |+DI - -DI| / (+DI + -DI) * 100
//   ADX         Wilder average of DX
//
// The first DX closes row `period`, so the first ADX value (mean of `period`
// DX values) lands on row `2 * period - 1`.
// =============================================================================

/// Directional movement and true range between row `i - 1` and row `i`.
fn directional_bar(high: &[f64], low: &[f64], close: &[f64], i: usize) -> (f64, f64, f64) {
    let tr = (high[i] - low[i])
        .max((high[i] - close[i - 1]).abs())
        .max((low[i] - close[i - 1]).abs());

    let up_move = high[i] - high[i - 1];
    let down_move = low[i - 1] - low[i];

    let dominant = |mv: f64, other: f64| if mv > other && mv > 0.0 { mv } else { 0.0 };

    (dominant(up_move, down_move), dominant(down_move, up_move), tr)
}

/// Compute the row-aligned ADX series.
///
/// Every row is `None` when `period` is zero or the table has fewer than
/// `2 * period` rows. A non-finite intermediate value ends the defined part.
pub fn calculate_adx(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = close.len();
    let mut result = vec![None; n];
    if period == 0 || n < period.saturating_mul(2) {
        return result;
    }
    let period_f = period as f64;

    let bars: Vec<(f64, f64, f64)> = (1..n).map(|i| directional_bar(high, low, close, i)).collect();

    // First smoothed sums cover rows 1..=period.
    let (mut smooth_plus_dm, mut smooth_minus_dm, mut smooth_tr) = bars[..period]
        .iter()
        .fold((0.0, 0.0, 0.0), |(p, m, t), &(pdm, mdm, tr)| (p + pdm, m + mdm, t + tr));

    // dx_values[k] closes row period + k.
    let mut dx_values: Vec<f64> = Vec::with_capacity(n - period);
    match compute_dx(smooth_plus_dm, smooth_minus_dm, smooth_tr) {
        Some(dx) => dx_values.push(dx),
        None => return result,
    }

    for &(pdm, mdm, tr) in &bars[period..] {
        smooth_plus_dm = smooth_plus_dm - smooth_plus_dm / period_f + pdm;
        smooth_minus_dm = smooth_minus_dm - smooth_minus_dm / period_f + mdm;
        smooth_tr = smooth_tr - smooth_tr / period_f + tr;

        match compute_dx(smooth_plus_dm, smooth_minus_dm, smooth_tr) {
            Some(dx) => dx_values.push(dx),
            None => break,
        }
    }

    if dx_values.len() < period {
        return result;
    }

    let first_row = 2 * period - 1;
    let mut adx = dx_values[..period].iter().sum::<f64>() / period_f;
    if !adx.is_finite() {
        return result;
    }
    result[first_row] = Some(adx);

    for (offset, &dx) in dx_values[period..].iter().enumerate() {
        adx = (adx * (period_f - 1.0) + dx) / period_f;
        if !adx.is_finite() {
            break;
        }
        result[first_row + 1 + offset] = Some(adx);
    }

    result
}

/// DX from the smoothed sums. Zero true range has no DX; no directional
/// movement at all reads 0.
fn compute_dx(plus_dm: f64, minus_dm: f64, tr: f64) -> Option<f64> {
    if tr == 0.0 {
        return None;
    }
    let (plus_di, minus_di) = (plus_dm / tr * 100.0, minus_dm / tr * 100.0);
    let spread = plus_di + minus_di;
    let dx = if spread == 0.0 {
        0.0
    } else {
        (plus_di - minus_di).abs() / spread * 100.0
    };
    Some(dx).filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trending_up(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let high = (0..n).map(|i| 101.0 + i as f64 * 2.0).collect();
        let low = (0..n).map(|i| 99.0 + i as f64 * 2.0).collect();
        let close = (0..n).map(|i| 100.0 + i as f64 * 2.0).collect();
        (high, low, close)
    }

    #[test]
    fn adx_insufficient_data() {
        let (h, l, c) = trending_up(5);
        assert!(calculate_adx(&h, &l, &c, 14).iter().all(Option::is_none));
    }

    #[test]
    fn adx_huge_period_is_undefined() {
        let (h, l, c) = trending_up(30);
        assert!(calculate_adx(&h, &l, &c, usize::MAX / 2 + 1).iter().all(Option::is_none));
    }

    #[test]
    fn adx_period_zero() {
        let (h, l, c) = trending_up(30);
        assert!(calculate_adx(&h, &l, &c, 0).iter().all(Option::is_none));
    }

    #[test]
    fn adx_first_defined_row() {
        let (h, l, c) = trending_up(40);
        let adx = calculate_adx(&h, &l, &c, 14);
        assert_eq!(adx.iter().position(Option::is_some), Some(27));
        assert!(adx[27..].iter().all(Option::is_some));
    }

    #[test]
    fn adx_strong_uptrend() {
        // Only up moves: -DM is always zero, so DX = 100 and ADX = 100.
        let (h, l, c) = trending_up(60);
        let adx = calculate_adx(&h, &l, &c, 14);
        let last = adx.last().copied().flatten().unwrap();
        assert!((last - 100.0).abs() < 1e-9, "ADX {last}");
    }

    #[test]
    fn adx_flat_market_stays_undefined() {
        // Zero true range everywhere: DX cannot be computed.
        let flat = vec![100.0; 40];
        assert!(calculate_adx(&flat, &flat, &flat, 14).iter().all(Option::is_none));
    }

    #[test]
    fn adx_range_bound() {
        let n = 80;
        let close: Vec<f64> = (0..n).map(|i| 100.0 + ((i as f64) * 0.7).sin() * 5.0).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        for v in calculate_adx(&high, &low, &close, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v), "ADX {v} out of range");
        }
    }
}
