// =============================================================================
// Range selection
// =============================================================================
//
// The engine always works on the full history; the dashboard only shows the
// chosen period. This is the boundary where columns become plain
// date/value pairs for rendering.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::Result;
use crate::market_data::PriceTable;
use crate::types::TimePeriod;

/// Trading days shown for the "1 month" period.
pub const TRADING_DAYS_PER_MONTH: usize = 22;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesView {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

/// First date shown for `period`, or `None` for an empty table.
pub fn period_start(table: &PriceTable, period: TimePeriod, today: NaiveDate) -> Option<NaiveDate> {
    let dates = table.dates();
    let first = *dates.first()?;
    let start = match period {
        TimePeriod::OneYear => first,
        TimePeriod::YearToDate => today.with_ordinal(1).unwrap_or(first),
        TimePeriod::OneMonth => {
            let row = dates.len().saturating_sub(1 + TRADING_DAYS_PER_MONTH);
            dates[row]
        }
        TimePeriod::MonthToDate => today.with_day(1).unwrap_or(first),
    };
    Some(start)
}

/// Rows with `date >= start` of each named column.
pub fn select(table: &PriceTable, columns: &[String], start: NaiveDate) -> Result<Vec<SeriesView>> {
    let dates = table.dates();
    let from = dates.partition_point(|d| *d < start);

    columns
        .iter()
        .map(|name| {
            let values = table.series(name)?;
            let points = dates[from..]
                .iter()
                .zip(&values[from..])
                .map(|(&date, &value)| SeriesPoint { date, value })
                .collect();
            Ok(SeriesView {
                name: name.clone(),
                points,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndicatorError;
    use crate::market_data::price_table::test_support::table_from_closes;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn period_start_dates() {
        let closes: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let table = table_from_closes(&closes);
        let today = date(2023, 2, 15);

        assert_eq!(period_start(&table, TimePeriod::OneYear, today), Some(date(2023, 1, 2)));
        assert_eq!(period_start(&table, TimePeriod::YearToDate, today), Some(date(2023, 1, 1)));
        assert_eq!(period_start(&table, TimePeriod::MonthToDate, today), Some(date(2023, 2, 1)));
        // 40 rows: row 17 is 22 rows before the last one.
        assert_eq!(period_start(&table, TimePeriod::OneMonth, today), Some(table.dates()[17]));
    }

    #[test]
    fn one_month_clamps_on_short_history() {
        let table = table_from_closes(&[1.0, 2.0, 3.0]);
        let start = period_start(&table, TimePeriod::OneMonth, date(2023, 1, 10));
        assert_eq!(start, Some(table.dates()[0]));
    }

    #[test]
    fn select_filters_rows_by_date() {
        let table = table_from_closes(&[1.0, 2.0, 3.0, 4.0]);
        let start = table.dates()[2];
        let views = select(&table, &["Close".to_string()], start).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].name, "Close");
        let values: Vec<Option<f64>> = views[0].points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![Some(3.0), Some(4.0)]);
    }

    #[test]
    fn select_keeps_undefined_rows() {
        let mut table = table_from_closes(&[1.0, 2.0, 3.0]);
        table
            .insert_column("warm", vec![None, None, Some(2.0)])
            .unwrap();
        let views = select(&table, &["warm".to_string()], table.dates()[0]).unwrap();
        assert_eq!(views[0].points[0].value, None);
        assert_eq!(views[0].points[2].value, Some(2.0));

        let json = serde_json::to_value(&views[0].points[0]).unwrap();
        assert_eq!(json["value"], serde_json::Value::Null);
        assert_eq!(json["date"], "2023-01-02");
    }

    #[test]
    fn select_unknown_column_fails() {
        let table = table_from_closes(&[1.0]);
        let err = select(&table, &["nope".to_string()], table.dates()[0]).unwrap_err();
        assert_eq!(err, IndicatorError::MissingColumn("nope".to_string()));
    }
}
