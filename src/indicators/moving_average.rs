// =============================================================================
// Moving Averages: SMA, EMA, DEMA, LWMA
// =============================================================================
//
// All functions are row-aligned: the output has one cell per input row and the
// warm-up prefix is `None`.
//
// SMA_t  = mean(price_{t-L+1} ..= price_t)
// EMA_t  = price_t * m + EMA_{t-1} * (1 - m),  m = 2 / (L + 1)
//          seeded with SMA_{L-1}
// DEMA_t = 2 * EMA_t - EMA(EMA)_t
// LWMA_t = Σ_{k=0}^{L-1} price_{t-k} * (L - k) / (L (L + 1) / 2)
// =============================================================================

/// Lift a fully defined base series into row cells.
pub fn defined(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/// Rolling arithmetic mean over `look_back` rows.
///
/// A row is defined only when every cell of its window is defined, so a
/// series with its own warm-up pushes the boundary further out.
pub fn rolling_mean(input: &[Option<f64>], look_back: usize) -> Vec<Option<f64>> {
    if look_back == 0 {
        return vec![None; input.len()];
    }
    let divisor = look_back as f64;

    (0..input.len())
        .map(|i| {
            if i + 1 < look_back {
                return None;
            }
            input[i + 1 - look_back..=i]
                .iter()
                .copied()
                .sum::<Option<f64>>()
                .map(|sum| sum / divisor)
        })
        .collect()
}

/// Simple moving average of a base price series.
pub fn simple_moving_average(prices: &[f64], look_back: usize) -> Vec<Option<f64>> {
    rolling_mean(&defined(prices), look_back)
}

/// Exponential recurrence over `input`, seeded from `seed`.
///
/// Until the recurrence has a previous value, each row takes the seed cell
/// (`None` while the seed is still warming up). Once seeded, every row needs
/// the row before it, so the whole series is a single left-to-right scan.
pub fn exponential_fold(
    input: &[Option<f64>],
    seed: &[Option<f64>],
    look_back: usize,
) -> Vec<Option<f64>> {
    let multiplier = 2.0 / (look_back as f64 + 1.0);

    input
        .iter()
        .zip(seed)
        .scan(None, |prev: &mut Option<f64>, (&value, &start)| {
            let next = match (*prev, value) {
                (Some(p), Some(v)) => Some(v * multiplier + p * (1.0 - multiplier)),
                (Some(_), None) => None,
                (None, _) => start,
            };
            *prev = next;
            Some(next)
        })
        .collect()
}

/// `2 * ema - smoothed` wherever both are defined.
pub fn double_exponential(ema: &[Option<f64>], smoothed: &[Option<f64>]) -> Vec<Option<f64>> {
    ema.iter()
        .zip(smoothed)
        .map(|(&e, &s)| Some(2.0 * e? - s?))
        .collect()
}

/// Sum of the integers `0..=n`, the LWMA normalising denominator.
pub fn triangular(n: usize) -> f64 {
    let n = n as f64;
    n * (n + 1.0) / 2.0
}

/// Linearly weighted moving average; the newest row carries weight `L`.
///
/// `boundary` decides which rows are defined (the SMA of the same window);
/// its values are not used.
pub fn linearly_weighted(
    prices: &[f64],
    boundary: &[Option<f64>],
    look_back: usize,
) -> Vec<Option<f64>> {
    let denominator = triangular(look_back);

    boundary
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            cell.map(|_| {
                let weighted: f64 = (0..look_back)
                    .map(|k| prices[i - k] * (look_back - k) as f64)
                    .sum();
                weighted / denominator
            })
        })
        .collect()
}
