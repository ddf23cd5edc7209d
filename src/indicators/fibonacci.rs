// =============================================================================
// Fibonacci retracement levels
// =============================================================================
//
// Levels are measured upward from the running low of Close:
//   level_r = low + (high - low) * r
// with high/low taken over rows 0..=t, so row t never looks ahead.
// =============================================================================

/// `(label, ratio)` for every level; the 50% level is the indicator's main line.
pub const LEVELS: [(&str, f64); 7] = [
    ("0%", 0.0),
    ("23.6%", 0.236),
    ("38.2%", 0.382),
    ("50%", 0.5),
    ("61.8%", 0.618),
    ("76.4%", 0.764),
    ("100%", 1.0),
];

pub const MAIN_LEVEL: &str = "50%";

/// One row-aligned series per entry of [`LEVELS`], in the same order.
pub fn calculate_fibonacci(closes: &[f64]) -> Vec<Vec<Option<f64>>> {
    let extremes: Vec<(f64, f64)> = closes
        .iter()
        .scan((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| {
            *lo = lo.min(c);
            *hi = hi.max(c);
            Some((*lo, *hi))
        })
        .collect();

    LEVELS
        .iter()
        .map(|&(_, ratio)| {
            extremes
                .iter()
                .map(|&(lo, hi)| Some(lo + (hi - lo) * ratio))
                .collect()
        })
        .collect()
}
