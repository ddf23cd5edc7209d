// =============================================================================
// Stockwatch: technical indicators over daily price history
// =============================================================================
//
// A `PriceTable` holds one ticker's OHLCV rows plus every indicator column
// computed on it so far. `indicators::ensure` resolves a descriptor and its
// prerequisites into that table; `selection` cuts the result down to the
// period the dashboard shows.
// =============================================================================

pub mod error;
pub mod indicators;
pub mod market_data;
pub mod runtime_config;
pub mod selection;
pub mod types;

pub use error::{IndicatorError, Result};
pub use indicators::{ensure, Catalog, Indicator};
pub use market_data::{HistoryStore, PriceRow, PriceTable};
