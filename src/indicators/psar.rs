// =============================================================================
// Parabolic SAR (stop and reverse)
// =============================================================================
//
// SAR_t = SAR_{t-1} + AF * (EP - SAR_{t-1})
//
// EP is the extreme point of the current trend, AF starts at `step` and grows
// by `step` on every new extreme up to `max_step`. In an uptrend the SAR may
// not rise above the two previous lows (below the two previous highs in a
// downtrend); price crossing the SAR flips the trend, the SAR jumps to the old
// EP and AF resets.
//
// Direction is taken from the first two bars, so row 0 is undefined.
// =============================================================================

struct SarState {
    rising: bool,
    sar: f64,
    extreme: f64,
    acceleration: f64,
}

pub fn calculate_psar(high: &[f64], low: &[f64], step: f64, max_step: f64) -> Vec<Option<f64>> {
    let n = high.len();
    let mut result = vec![None; n];
    if n < 2 {
        return result;
    }

    let rising = high[1] > high[0];
    let mut state = SarState {
        rising,
        sar: if rising { low[0] } else { high[0] },
        extreme: if rising { high[0] } else { low[0] },
        acceleration: step,
    };

    for i in 1..n {
        let mut sar = state.sar + state.acceleration * (state.extreme - state.sar);

        if state.rising {
            sar = sar.min(low[i - 1]);
            if i >= 2 {
                sar = sar.min(low[i - 2]);
            }
            if low[i] < sar {
                state.rising = false;
                sar = state.extreme;
                state.extreme = low[i];
                state.acceleration = step;
            } else if high[i] > state.extreme {
                state.extreme = high[i];
                state.acceleration = (state.acceleration + step).min(max_step);
            }
        } else {
            sar = sar.max(high[i - 1]);
            if i >= 2 {
                sar = sar.max(high[i - 2]);
            }
            if high[i] > sar {
                state.rising = true;
                sar = state.extreme;
                state.extreme = high[i];
                state.acceleration = step;
            } else if low[i] < state.extreme {
                state.extreme = low[i];
                state.acceleration = (state.acceleration + step).min(max_step);
            }
        }

        state.sar = sar;
        result[i] = Some(sar);
    }

    result
}
