// =============================================================================
// Stockwatch: Main Entry Point
// =============================================================================
//
// stockwatch [TICKER] [INDICATOR] [PERIOD]
//
// Loads the ticker's history, resolves the indicator into it and prints the
// Close line plus every indicator line for the chosen period as JSON.
// Missing arguments fall back to the runtime config defaults.
// =============================================================================

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use serde_json::json;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use stockwatch::runtime_config::RuntimeConfig;
use stockwatch::selection::{period_start, select};
use stockwatch::types::{PriceField, TimePeriod};
use stockwatch::{HistoryStore, IndicatorError};

const LOAD_FAILURE: &str = "Data cannot be loaded, try another stock or try later again!";

#[derive(Parser, Debug)]
#[command(name = "stockwatch")]
#[command(about = "Technical indicators over daily price history", long_about = None)]
struct Cli {
    /// Ticker symbol (default from the runtime config)
    ticker: Option<String>,

    /// Indicator name, e.g. "12 / 26 day MACD"
    indicator: Option<String>,

    /// Period shown: "1 year", "YTD", "1 month" or "MTD"
    #[arg(value_parser = parse_period)]
    period: Option<TimePeriod>,
}

fn parse_period(raw: &str) -> Result<TimePeriod, String> {
    raw.parse().map_err(|e: IndicatorError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = RuntimeConfig::path_from_env();
    let config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        let config = RuntimeConfig::default();
        if !config_path.exists() {
            if let Err(e) = config.save(&config_path) {
                warn!(error = %e, "Failed to write config template");
            }
        }
        config
    });

    // ── 2. Arguments ─────────────────────────────────────────────────────
    let ticker = cli
        .ticker
        .unwrap_or_else(|| config.default_ticker.clone())
        .to_uppercase();
    let indicator_name = cli
        .indicator
        .unwrap_or_else(|| config.default_indicator.clone());
    let period = cli.period.unwrap_or(config.default_period);

    if !config.tickers.iter().any(|t| t.eq_ignore_ascii_case(&ticker)) {
        warn!(ticker = %ticker, "ticker is not on the dashboard list");
    }

    let catalog = config.catalog()?;
    let indicator = catalog.resolve(&indicator_name)?.clone();

    info!(
        ticker = %ticker,
        indicator = %indicator,
        period = %period,
        "stockwatch request"
    );

    // ── 3. Load & compute ────────────────────────────────────────────────
    let store = HistoryStore::new(&config.data_dir);
    if let Err(e) = store.table(&ticker) {
        error!(ticker = %ticker, error = %format!("{e:#}"), "{}", LOAD_FAILURE);
        anyhow::bail!(LOAD_FAILURE);
    }

    let views = store.with_table(&ticker, |table| -> anyhow::Result<_> {
        catalog
            .ensure_named(table, &indicator_name)
            .with_context(|| format!("failed to compute {indicator_name} for {ticker}"))?;

        let start = period_start(table, period, Local::now().date_naive())
            .context("price history is empty")?;

        let mut columns = vec![PriceField::Close.column_name().to_string()];
        columns.extend(indicator.output_columns());
        Ok(select(table, &columns, start)?)
    })??;

    // ── 4. Output ────────────────────────────────────────────────────────
    let (close, lines) = views.split_at(1);
    let panel = if indicator.separate_panel() { "separate" } else { "overlay" };
    let document = json!({
        "ticker": ticker,
        "indicator": indicator.name(),
        "period": period,
        "panel": panel,
        "close": close[0],
        "series": lines,
    });
    println!("{}", serde_json::to_string_pretty(&document)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positionals_are_optional() {
        let cli = Cli::try_parse_from(["stockwatch"]).unwrap();
        assert!(cli.ticker.is_none());
        assert!(cli.indicator.is_none());
        assert!(cli.period.is_none());
    }

    #[test]
    fn parses_ticker_indicator_and_period() {
        let cli = Cli::try_parse_from(["stockwatch", "msft", "14 day RSI", "ytd"]).unwrap();
        assert_eq!(cli.ticker.as_deref(), Some("msft"));
        assert_eq!(cli.indicator.as_deref(), Some("14 day RSI"));
        assert_eq!(cli.period, Some(TimePeriod::YearToDate));
    }

    #[test]
    fn unknown_period_is_a_usage_error() {
        let err = Cli::try_parse_from(["stockwatch", "AAPL", "21 day EMA", "decade"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
