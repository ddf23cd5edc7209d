use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::IndicatorError;
use crate::market_data::price_table::{PriceRow, PriceTable};
use crate::types::PriceField;

/// One CSV record as written by the data provider. Extra columns such as
/// `Dividends` or `Stock Splits` are ignored.
#[derive(Debug, Deserialize)]
struct HistoryRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Volume")]
    volume: f64,
}

fn verify_required_columns(headers: &csv::StringRecord) -> std::result::Result<(), IndicatorError> {
    let required = std::iter::once("Date").chain(PriceField::ALL.iter().map(|f| f.column_name()));
    for column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(IndicatorError::MalformedInput(format!(
                "missing required column '{column}'"
            )));
        }
    }
    Ok(())
}

/// Accepts `2023-01-03` as well as timestamps such as
/// `2023-01-03 00:00:00-05:00`; only the calendar date is kept.
fn parse_date(raw: &str) -> std::result::Result<NaiveDate, IndicatorError> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| IndicatorError::MalformedInput(format!("bad date '{raw}': {e}")))
}

/// Parse a provider CSV into a price table.
///
/// Every failure is reported as `MalformedInput`: no indicator can be computed
/// from a history that does not parse.
pub fn parse_history<R: Read>(reader: R) -> std::result::Result<PriceTable, IndicatorError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| IndicatorError::MalformedInput(e.to_string()))?
        .clone();
    verify_required_columns(&headers)?;

    let mut rows = Vec::new();
    for record in rdr.deserialize::<HistoryRecord>() {
        let record = record.map_err(|e| IndicatorError::MalformedInput(e.to_string()))?;
        rows.push(PriceRow {
            date: parse_date(&record.date)?,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
        });
    }
    debug!(rows = rows.len(), "parsed price history");

    PriceTable::from_rows(rows)
}

/// Read `{path}` from disk and parse it.
pub fn load_history(path: impl AsRef<Path>) -> Result<PriceTable> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open price history {}", path.display()))?;
    let table = parse_history(file)
        .with_context(|| format!("failed to parse price history {}", path.display()))?;

    info!(path = %path.display(), rows = table.len(), "price history loaded");
    Ok(table)
}
