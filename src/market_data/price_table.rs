use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};
use crate::types::PriceField;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single daily OHLCV row as supplied by the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceRow {
    pub fn field(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
            PriceField::Volume => self.volume,
        }
    }
}

/// State of one indicator cell.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Unwritten,
    Undefined,
    Defined(f64),
}

impl From<Option<f64>> for Slot {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Undefined, Self::Defined)
    }
}

// ---------------------------------------------------------------------------
// PriceTable -- the column store
// ---------------------------------------------------------------------------

/// Ordered price history plus a growable set of named indicator columns.
///
/// Rows are fixed at construction (ascending, unique dates). Indicator columns
/// are added in place and a written cell never changes afterwards, so any
/// value read from the table stays valid for the table's lifetime.
#[derive(Debug, Clone)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    base: [Vec<f64>; 5],
    columns: HashMap<String, Vec<Slot>>,
    order: Vec<String>,
}

impl PriceTable {
    /// Build a table from provider rows.
    ///
    /// Fails with `MalformedInput` when dates are not strictly ascending or a
    /// base field is not finite.
    pub fn from_rows(rows: Vec<PriceRow>) -> Result<Self> {
        for pair in rows.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(IndicatorError::MalformedInput(format!(
                    "dates must be strictly ascending: {} follows {}",
                    pair[1].date, pair[0].date
                )));
            }
        }

        let mut base: [Vec<f64>; 5] = Default::default();
        for row in &rows {
            for (slot, field) in PriceField::ALL.into_iter().enumerate() {
                let value = row.field(field);
                if !value.is_finite() {
                    return Err(IndicatorError::MalformedInput(format!(
                        "{field} on {} is not a finite number",
                        row.date
                    )));
                }
                base[slot].push(value);
            }
        }

        Ok(Self {
            dates: rows.iter().map(|r| r.date).collect(),
            base,
            columns: HashMap::new(),
            order: Vec::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Raw values of a base field, one per row.
    pub fn field(&self, field: PriceField) -> &[f64] {
        &self.base[field as usize]
    }

    /// Indicator column names in the order they were added.
    pub fn indicator_columns(&self) -> &[String] {
        &self.order
    }

    /// True for base field names and for any indicator column written so far.
    pub fn has_column(&self, name: &str) -> bool {
        PriceField::from_column_name(name).is_some() || self.columns.contains_key(name)
    }

    /// Read one cell. `Ok(None)` means the cell is explicitly undefined
    /// (warm-up); a cell that was never written is a lookup error.
    pub fn get(&self, name: &str, row: usize) -> Result<Option<f64>> {
        self.check_row(row)?;
        if let Some(field) = PriceField::from_column_name(name) {
            return Ok(Some(self.field(field)[row]));
        }
        let column = self
            .columns
            .get(name)
            .ok_or_else(|| IndicatorError::MissingColumn(name.to_string()))?;
        match column[row] {
            Slot::Defined(v) => Ok(Some(v)),
            Slot::Undefined => Ok(None),
            Slot::Unwritten => Err(IndicatorError::UnwrittenCell {
                column: name.to_string(),
                row,
            }),
        }
    }

    /// Write one cell, creating the column if needed.
    ///
    /// Rewriting a cell with the value it already holds is a no-op; any other
    /// rewrite is a `ColumnConflict`. Base fields are read-only.
    pub fn set(&mut self, name: &str, row: usize, value: Option<f64>) -> Result<()> {
        self.check_row(row)?;
        if PriceField::from_column_name(name).is_some() {
            return Err(IndicatorError::ColumnConflict(name.to_string()));
        }
        let len = self.len();
        if !self.columns.contains_key(name) {
            self.order.push(name.to_string());
        }
        let column = self
            .columns
            .entry(name.to_string())
            .or_insert_with(|| vec![Slot::Unwritten; len]);

        let incoming = Slot::from(value);
        match column[row] {
            Slot::Unwritten => {
                column[row] = incoming;
                Ok(())
            }
            existing if existing == incoming => Ok(()),
            _ => Err(IndicatorError::ColumnConflict(name.to_string())),
        }
    }

    /// Add a fully computed column. The name must be new.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<()> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(IndicatorError::ColumnConflict(name));
        }
        if values.len() != self.len() {
            return Err(IndicatorError::LengthMismatch {
                column: name,
                expected: self.len(),
                actual: values.len(),
            });
        }
        self.columns
            .insert(name.clone(), values.into_iter().map(Slot::from).collect());
        self.order.push(name);
        Ok(())
    }

    /// Whole column as row-aligned optional values.
    ///
    /// Fails if any cell is still unwritten.
    pub fn series(&self, name: &str) -> Result<Vec<Option<f64>>> {
        if let Some(field) = PriceField::from_column_name(name) {
            return Ok(self.field(field).iter().copied().map(Some).collect());
        }
        let column = self
            .columns
            .get(name)
            .ok_or_else(|| IndicatorError::MissingColumn(name.to_string()))?;
        column
            .iter()
            .enumerate()
            .map(|(row, slot)| match *slot {
                Slot::Defined(v) => Ok(Some(v)),
                Slot::Undefined => Ok(None),
                Slot::Unwritten => Err(IndicatorError::UnwrittenCell {
                    column: name.to_string(),
                    row,
                }),
            })
            .collect()
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.len() {
            return Err(IndicatorError::RowOutOfRange {
                row,
                len: self.len(),
            });
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn base_fields_are_columns() {
        let table = table_from_closes(&[1.0, 2.0, 3.0]);
        assert_eq!(table.len(), 3);
        assert!(table.has_column("Close"));
        assert!(table.has_column("Volume"));
        assert!(!table.has_column("21 day EMA"));
        assert_eq!(table.get("Close", 2).unwrap(), Some(3.0));
        assert_eq!(table.series("Close").unwrap(), vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn rejects_unordered_dates() {
        let day = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        let row = |date| PriceRow {
            date,
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: 1.0,
        };
        let err = PriceTable::from_rows(vec![row(day), row(day)]).unwrap_err();
        assert!(matches!(err, IndicatorError::MalformedInput(_)));
    }

    #[test]
    fn rejects_non_finite_prices() {
        let mut rows = vec![PriceRow {
            date: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: f64::NAN,
            volume: 1.0,
        }];
        assert!(PriceTable::from_rows(rows.clone()).is_err());
        rows[0].close = 1.0;
        assert!(PriceTable::from_rows(rows).is_ok());
    }

    #[test]
    fn sparse_writes_and_lookup_errors() {
        let mut table = table_from_closes(&[1.0, 2.0, 3.0, 4.0]);
        table.set("partial", 0, None).unwrap();
        table.set("partial", 2, Some(7.5)).unwrap();

        assert!(table.has_column("partial"));
        assert_eq!(table.get("partial", 0).unwrap(), None);
        assert_eq!(table.get("partial", 2).unwrap(), Some(7.5));
        assert_eq!(
            table.get("partial", 1).unwrap_err(),
            IndicatorError::UnwrittenCell {
                column: "partial".to_string(),
                row: 1
            }
        );
        assert!(table.series("partial").is_err());
        assert!(matches!(
            table.get("partial", 9),
            Err(IndicatorError::RowOutOfRange { row: 9, len: 4 })
        ));
        assert!(matches!(table.get("nope", 0), Err(IndicatorError::MissingColumn(_))));
    }

    #[test]
    fn written_cells_are_never_overwritten() {
        let mut table = table_from_closes(&[1.0, 2.0]);
        table.set("x", 1, Some(5.0)).unwrap();
        table.set("x", 1, Some(5.0)).unwrap();
        assert_eq!(
            table.set("x", 1, Some(6.0)).unwrap_err(),
            IndicatorError::ColumnConflict("x".to_string())
        );
        assert!(table.set("x", 1, None).is_err());
        assert!(table.set("Close", 0, Some(9.0)).is_err());
    }

    #[test]
    fn insert_column_checks_name_and_length() {
        let mut table = table_from_closes(&[1.0, 2.0, 3.0]);
        table.insert_column("a", vec![None, Some(1.0), Some(2.0)]).unwrap();
        assert_eq!(table.series("a").unwrap(), vec![None, Some(1.0), Some(2.0)]);

        assert!(matches!(
            table.insert_column("a", vec![None, None, None]),
            Err(IndicatorError::ColumnConflict(_))
        ));
        assert!(matches!(
            table.insert_column("Close", vec![None, None, None]),
            Err(IndicatorError::ColumnConflict(_))
        ));
        assert!(matches!(
            table.insert_column("b", vec![None]),
            Err(IndicatorError::LengthMismatch { expected: 3, actual: 1, .. })
        ));
    }

    #[test]
    fn indicator_columns_keep_insertion_order() {
        let mut table = table_from_closes(&[1.0]);
        table.insert_column("z", vec![None]).unwrap();
        table.set("a", 0, Some(1.0)).unwrap();
        table.insert_column("m", vec![Some(2.0)]).unwrap();
        assert_eq!(table.indicator_columns(), ["z", "a", "m"]);
    }
}
