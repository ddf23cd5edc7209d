// =============================================================================
// Dependency resolver
// =============================================================================
//
// `ensure` makes every output column of a descriptor present in the table,
// computing prerequisites first. A present main column is the memo: nothing is
// ever recomputed, and a series written once is never rewritten.
//
// Columns of one descriptor are written companions first, main column last, so
// the main column only appears once the whole result is in the table.

use tracing::{debug, trace};

use super::adx::calculate_adx;
use super::aroon::calculate_aroon;
use super::bollinger::calculate_bollinger;
use super::chaikin::calculate_chaikin;
use super::descriptor::Indicator;
use super::fibonacci::calculate_fibonacci;
use super::macd::calculate_macd;
use super::moving_average::{
    defined, double_exponential, exponential_fold, linearly_weighted, simple_moving_average,
};
use super::psar::calculate_psar;
use super::rsi::calculate_rsi;
use super::stochastic::calculate_stochastic;
use crate::error::{IndicatorError, Result};
use crate::market_data::PriceTable;
use crate::types::PriceField;

/// Compute `indicator` (and anything it depends on) into `table` unless it is
/// already there.
pub fn ensure(table: &mut PriceTable, indicator: &Indicator) -> Result<()> {
    let name = indicator.name();
    if table.has_column(&name) {
        trace!(indicator = %name, "column already present");
        return Ok(());
    }

    indicator.validate()?;

    for prerequisite in indicator.prerequisites() {
        ensure(table, &prerequisite)?;
    }

    let warm_up = indicator.first_defined_row();
    if table.len() <= warm_up {
        debug!(
            indicator = %name,
            rows = table.len(),
            first_defined_row = warm_up,
            "history shorter than warm-up, every row will be undefined"
        );
    }

    let columns = indicator.output_columns();
    if let Some(taken) = columns.iter().find(|c| table.has_column(c)) {
        return Err(IndicatorError::ColumnConflict(taken.clone()));
    }

    let outputs = compute(table, indicator)?;
    debug_assert_eq!(outputs.len(), columns.len(), "{name}: output count");

    for (column, values) in columns.into_iter().zip(outputs).rev() {
        table.insert_column(column, values)?;
    }

    debug!(indicator = %name, rows = table.len(), "indicator computed");
    Ok(())
}

/// One series per entry of `indicator.output_columns()`, same order.
fn compute(table: &PriceTable, indicator: &Indicator) -> Result<Vec<Vec<Option<f64>>>> {
    let high = table.field(PriceField::High);
    let low = table.field(PriceField::Low);
    let close = table.field(PriceField::Close);

    let outputs = match *indicator {
        Indicator::Sma { look_back, field } => {
            vec![simple_moving_average(table.field(field), look_back)]
        }
        Indicator::Ema { look_back, field } => {
            let seed = table.series(&Indicator::Sma { look_back, field }.name())?;
            vec![exponential_fold(&defined(table.field(field)), &seed, look_back)]
        }
        Indicator::DoubleSmoothedEma { look_back, field } => {
            let ema = table.series(&Indicator::Ema { look_back, field }.name())?;
            vec![exponential_fold(&ema, &ema, look_back)]
        }
        Indicator::Dema { look_back, field } => {
            let ema = table.series(&Indicator::Ema { look_back, field }.name())?;
            let smoothed = table.series(&Indicator::DoubleSmoothedEma { look_back, field }.name())?;
            vec![double_exponential(&ema, &smoothed)]
        }
        Indicator::Lwma { look_back, field } => {
            let boundary = table.series(&Indicator::Sma { look_back, field }.name())?;
            vec![linearly_weighted(table.field(field), &boundary, look_back)]
        }
        Indicator::Macd {
            fast,
            slow,
            signal,
            field,
        } => {
            let fast_ema = table.series(&Indicator::Ema { look_back: fast, field }.name())?;
            let slow_ema = table.series(&Indicator::Ema { look_back: slow, field }.name())?;
            let macd = calculate_macd(&fast_ema, &slow_ema, signal);
            vec![macd.macd, macd.signal]
        }
        Indicator::Bollinger { look_back } => {
            let bands = calculate_bollinger(high, low, close, look_back);
            vec![bands.middle, bands.lower, bands.upper, bands.std]
        }
        Indicator::Rsi { look_back } => vec![calculate_rsi(close, look_back)],
        Indicator::Adx { look_back } => vec![calculate_adx(high, low, close, look_back)],
        Indicator::Stochastic { look_back, signal } => {
            let stochastic = calculate_stochastic(high, low, close, look_back, signal);
            vec![stochastic.k, stochastic.d]
        }
        Indicator::Aroon { look_back } => {
            let aroon = calculate_aroon(high, low, look_back);
            vec![aroon.oscillator, aroon.up, aroon.down]
        }
        Indicator::Chaikin { fast, slow } => {
            let volume = table.field(PriceField::Volume);
            vec![calculate_chaikin(high, low, close, volume, fast, slow)]
        }
        Indicator::ParabolicSar { step, max_step } => {
            vec![calculate_psar(high, low, step, max_step)]
        }
        Indicator::Fibonacci => {
            let mut levels = calculate_fibonacci(close);
            // Main (50%) level first, the rest keep their ascending order.
            let main = super::fibonacci::LEVELS
                .iter()
                .position(|(label, _)| *label == super::fibonacci::MAIN_LEVEL)
                .unwrap_or(0);
            let main_series = levels.remove(main);
            std::iter::once(main_series).chain(levels).collect()
        }
    };

    Ok(outputs)
}
