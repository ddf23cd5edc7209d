// =============================================================================
// Aroon Indicator
// =============================================================================
//
// Over the last `look_back + 1` rows:
//   up   = (L - rows since highest high) / L * 100
//   down = (L - rows since lowest low)  / L * 100
//   oscillator = up - down
//
// Ties resolve to the most recent extreme. First defined row is `look_back`.
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AroonSeries {
    pub up: Vec<Option<f64>>,
    pub down: Vec<Option<f64>>,
    pub oscillator: Vec<Option<f64>>,
}

pub fn calculate_aroon(high: &[f64], low: &[f64], look_back: usize) -> AroonSeries {
    let n = high.len();
    let mut up = vec![None; n];
    let mut down = vec![None; n];
    let mut oscillator = vec![None; n];
    if look_back == 0 {
        return AroonSeries { up, down, oscillator };
    }
    let period = look_back as f64;

    for i in look_back..n {
        let start = i - look_back;
        let (mut max_idx, mut min_idx) = (start, start);
        for j in start..=i {
            if high[j] >= high[max_idx] {
                max_idx = j;
            }
            if low[j] <= low[min_idx] {
                min_idx = j;
            }
        }
        let a_up = (period - (i - max_idx) as f64) / period * 100.0;
        let a_down = (period - (i - min_idx) as f64) / period * 100.0;
        up[i] = Some(a_up);
        down[i] = Some(a_down);
        oscillator[i] = Some(a_up - a_down);
    }

    AroonSeries { up, down, oscillator }
}
