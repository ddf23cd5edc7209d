use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::market_data::loader;
use crate::market_data::price_table::PriceTable;

// ---------------------------------------------------------------------------
// HistoryStore -- one price table per ticker
// ---------------------------------------------------------------------------

/// Thread-safe cache of price tables keyed by ticker.
///
/// Each table sits behind its own mutex: indicator resolution needs exclusive
/// access to a table for the whole call, while different tickers can be worked
/// on in parallel. Tables are read from `{data_dir}/{TICKER}.csv` on first use
/// and kept for the life of the store, so indicator columns computed once stay
/// available to later requests.
pub struct HistoryStore {
    tables: RwLock<HashMap<String, Arc<Mutex<PriceTable>>>>,
    data_dir: PathBuf,
}

impl HistoryStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            data_dir: data_dir.into(),
        }
    }

    fn normalise(ticker: &str) -> String {
        ticker.trim().to_uppercase()
    }

    /// Path the provider writes a ticker's history to.
    pub fn history_path(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", Self::normalise(ticker)))
    }

    /// Register a table directly, replacing any cached one.
    #[cfg(test)]
    pub(crate) fn insert(&self, ticker: &str, table: PriceTable) {
        self.tables
            .write()
            .insert(Self::normalise(ticker), Arc::new(Mutex::new(table)));
    }

    /// Return the cached table, loading it from disk on first request.
    pub fn table(&self, ticker: &str) -> Result<Arc<Mutex<PriceTable>>> {
        let key = Self::normalise(ticker);
        if let Some(table) = self.tables.read().get(&key) {
            return Ok(table.clone());
        }

        let loaded = loader::load_history(self.history_path(&key))?;
        let mut map = self.tables.write();
        // Another caller may have loaded the same ticker meanwhile; keep theirs
        // so columns already computed on it are not lost.
        let entry = map
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(loaded)));
        debug!(ticker = %key, "price table cached");
        Ok(entry.clone())
    }

    /// Run `f` with exclusive access to a ticker's table.
    pub fn with_table<T>(&self, ticker: &str, f: impl FnOnce(&mut PriceTable) -> T) -> Result<T> {
        let table = self.table(ticker)?;
        let mut guard = table.lock();
        Ok(f(&mut guard))
    }

    /// Tickers currently cached, sorted.
    #[cfg(test)]
    pub(crate) fn tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = self.tables.read().keys().cloned().collect();
        tickers.sort();
        tickers
    }
}
