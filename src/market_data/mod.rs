pub mod history_store;
pub mod loader;
pub mod price_table;

// Re-export the table types for convenient access (e.g. `use crate::market_data::PriceTable`).
pub use history_store::HistoryStore;
pub use price_table::{PriceRow, PriceTable};
