// =============================================================================
// Relative Strength Index (RSI), Wilder's Smoothing
// =============================================================================
//
// Each row splits the close-to-close change into an up move and a down move.
// The first `period` moves are averaged plainly; after that both averages
// follow Wilder's recurrence
//
//   avg_t = (avg_{t-1} * (period - 1) + move_t) / period
//
// and RSI = 100 - 100 / (1 + avg_up / avg_down).
//
// Row `period` is the first defined row (it closes the first `period` moves).
// =============================================================================

/// Row-aligned RSI of `closes`.
///
/// No down moves at all reads 100, no movement at all reads 50. Every row is
/// `None` when `period` is zero or there are not `period + 1` closes.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = closes.len();
    if period == 0 || n <= period {
        return vec![None; n];
    }
    let period_f = period as f64;

    let moves: Vec<(f64, f64)> = closes
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .collect();

    let (up_sum, down_sum) = moves[..period]
        .iter()
        .fold((0.0, 0.0), |(up, down), &(u, d)| (up + u, down + d));
    let seed = (up_sum / period_f, down_sum / period_f);

    let averages = std::iter::once(seed).chain(moves[period..].iter().scan(seed, |avg, &(u, d)| {
        avg.0 = (avg.0 * (period_f - 1.0) + u) / period_f;
        avg.1 = (avg.1 * (period_f - 1.0) + d) / period_f;
        Some(*avg)
    }));

    std::iter::repeat(None)
        .take(period)
        .chain(averages.map(|(up, down)| Some(strength_index(up, down)).filter(|v| v.is_finite())))
        .collect()
}

fn strength_index(avg_up: f64, avg_down: f64) -> f64 {
    match (avg_up == 0.0, avg_down == 0.0) {
        (true, true) => 50.0,
        (false, true) => 100.0,
        _ => 100.0 - 100.0 / (1.0 + avg_up / avg_down),
    }
}
