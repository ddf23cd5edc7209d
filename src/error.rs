// =============================================================================
// Indicator engine error taxonomy
// =============================================================================
//
// Every failure is deterministic: retrying the same request on the same table
// fails the same way, so errors are reported once and never retried.
//
// A table that is shorter than an indicator's warm-up is NOT an error; those
// rows are simply undefined.

use thiserror::Error;

/// Errors raised by the column store, the resolver and history ingestion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    /// The requested name has no descriptor in the catalog.
    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),

    /// The price history cannot support any indicator (missing base column,
    /// unparsable value, unordered dates).
    #[error("malformed price history: {0}")]
    MalformedInput(String),

    /// A descriptor carries a parameter its algorithm cannot use.
    #[error("invalid parameter for '{indicator}': {reason}")]
    InvalidParameter { indicator: String, reason: String },

    /// No base field or indicator column with this name exists.
    #[error("no column named '{0}'")]
    MissingColumn(String),

    /// The cell exists in the table's shape but nothing was ever written to it.
    #[error("cell '{column}'[{row}] was never written")]
    UnwrittenCell { column: String, row: usize },

    /// Row index past the end of the table.
    #[error("row {row} out of range for a table of {len} rows")]
    RowOutOfRange { row: usize, len: usize },

    /// A write would replace values already stored under this name.
    #[error("column '{0}' already holds different values")]
    ColumnConflict(String),

    /// A whole-column write does not match the table's row count.
    #[error("column '{column}' has {actual} rows, table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, IndicatorError>;
