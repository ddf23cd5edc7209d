// =============================================================================
// Runtime Configuration: dashboard settings with atomic save
// =============================================================================
//
// Which tickers are offered, where their price history lives, which
// indicators are enabled and what the dashboard shows on start-up.
//
// Persistence uses an atomic tmp + rename pattern.  Every field carries a
// serde default so an older or partial config file still loads.
//
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::indicators::{Catalog, Indicator};
use crate::types::TimePeriod;

pub const CONFIG_PATH_ENV: &str = "STOCKWATCH_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "stockwatch.json";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_tickers() -> Vec<String> {
    [
        "AAPL", "ABNB", "AMD", "AMZN", "BA", "CSCO", "DIS", "DKNG", "GM", "GOOGL", "IBM", "INT",
        "JNJ", "KO", "META", "MSFT", "NKE", "VZ", "WMT",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_ticker() -> String {
    "AAPL".to_string()
}

fn default_indicator() -> String {
    "12 / 26 day MACD".to_string()
}

// =============================================================================
// RuntimeConfig
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Directory holding one `TICKER.csv` per ticker.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,

    /// Catalog names to offer; empty means every dashboard indicator.
    #[serde(default)]
    pub indicators: Vec<String>,

    /// Additional parameterisations, always offered.
    #[serde(default)]
    pub extra_indicators: Vec<Indicator>,

    #[serde(default = "default_ticker")]
    pub default_ticker: String,

    #[serde(default = "default_indicator")]
    pub default_indicator: String,

    #[serde(default)]
    pub default_period: TimePeriod,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            tickers: default_tickers(),
            indicators: Vec::new(),
            extra_indicators: Vec::new(),
            default_ticker: default_ticker(),
            default_indicator: default_indicator(),
            default_period: TimePeriod::default(),
        }
    }
}

impl RuntimeConfig {
    /// Config path from `STOCKWATCH_CONFIG`, falling back to `stockwatch.json`.
    pub fn path_from_env() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            tickers = config.tickers.len(),
            data_dir = %config.data_dir.display(),
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise runtime config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "runtime config saved (atomic)");
        Ok(())
    }

    /// Catalog offered by this deployment: the enabled dashboard indicators
    /// followed by the extra ones.
    pub fn catalog(&self) -> Result<Catalog> {
        let dashboard = Catalog::dashboard();
        let mut catalog = if self.indicators.is_empty() {
            dashboard
        } else {
            dashboard
                .restricted_to(&self.indicators)
                .context("runtime config enables an unknown indicator")?
        };

        for extra in &self.extra_indicators {
            catalog
                .register(extra.clone())
                .with_context(|| format!("invalid extra indicator {extra}"))?;
        }

        Ok(catalog)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceField;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.tickers.len(), 19);
        assert_eq!(cfg.default_ticker, "AAPL");
        assert_eq!(cfg.default_indicator, "12 / 26 day MACD");
        assert_eq!(cfg.default_period, TimePeriod::OneYear);
        assert!(cfg.indicators.is_empty());
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, RuntimeConfig::default());
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{
            "default_ticker": "MSFT",
            "default_period": "YTD",
            "extra_indicators": [{ "kind": "sma", "look_back": 50 }]
        }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.default_ticker, "MSFT");
        assert_eq!(cfg.default_period, TimePeriod::YearToDate);
        assert_eq!(
            cfg.extra_indicators,
            vec![Indicator::Sma {
                look_back: 50,
                field: PriceField::Close
            }]
        );
        assert_eq!(cfg.tickers.len(), 19);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockwatch.json");
        let mut cfg = RuntimeConfig::default();
        cfg.indicators = vec!["14 day RSI".to_string()];
        cfg.save(&path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(RuntimeConfig::load(&path).unwrap(), cfg);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RuntimeConfig::load(dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn catalog_respects_enabled_and_extra_indicators() {
        let mut cfg = RuntimeConfig::default();
        assert_eq!(cfg.catalog().unwrap().names().len(), 13);

        cfg.indicators = vec!["14 day RSI".to_string(), "21 day EMA".to_string()];
        cfg.extra_indicators = vec![Indicator::Ema {
            look_back: 100,
            field: PriceField::Close,
        }];
        let catalog = cfg.catalog().unwrap();
        assert_eq!(catalog.names(), ["14 day RSI", "21 day EMA", "100 day EMA"]);

        cfg.indicators = vec!["nonsense".to_string()];
        assert!(cfg.catalog().is_err());
    }
}
