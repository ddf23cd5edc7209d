// =============================================================================
// Indicator catalog
// =============================================================================
//
// Maps user-facing names to descriptors. The dashboard set is built once; a
// deployment may narrow it through configuration or register extra
// parameterisations.

use std::collections::HashMap;

use tracing::debug;

use super::descriptor::{Indicator, MACD_SIGNAL, PSAR_MAX_STEP, PSAR_STEP, STOCHASTIC_SIGNAL};
use super::engine::ensure;
use crate::error::{IndicatorError, Result};
use crate::market_data::PriceTable;
use crate::types::PriceField;

/// The indicators offered by the dashboard, in menu order.
pub fn dashboard_indicators() -> Vec<Indicator> {
    let field = PriceField::Close;
    vec![
        Indicator::Chaikin { fast: 3, slow: 10 },
        Indicator::Macd {
            fast: 12,
            slow: 26,
            signal: MACD_SIGNAL,
            field,
        },
        Indicator::Adx { look_back: 14 },
        Indicator::Rsi { look_back: 14 },
        Indicator::Stochastic {
            look_back: 14,
            signal: STOCHASTIC_SIGNAL,
        },
        Indicator::Bollinger { look_back: 21 },
        Indicator::Dema { look_back: 21, field },
        Indicator::Ema { look_back: 21, field },
        Indicator::Lwma { look_back: 21, field },
        Indicator::Sma { look_back: 21, field },
        Indicator::Aroon { look_back: 25 },
        Indicator::Fibonacci,
        Indicator::ParabolicSar {
            step: PSAR_STEP,
            max_step: PSAR_MAX_STEP,
        },
    ]
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, Indicator>,
    order: Vec<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding [`dashboard_indicators`].
    pub fn dashboard() -> Self {
        let mut catalog = Self::new();
        for indicator in dashboard_indicators() {
            catalog.entries.insert(indicator.name(), indicator.clone());
            catalog.order.push(indicator.name());
        }
        catalog
    }

    /// Add a descriptor under its canonical name and return that name.
    ///
    /// Registering an identical descriptor twice is a no-op.
    pub fn register(&mut self, indicator: Indicator) -> Result<String> {
        indicator.validate()?;
        let name = indicator.name();
        if !self.entries.contains_key(&name) {
            debug!(indicator = %name, "registered indicator");
            self.order.push(name.clone());
            self.entries.insert(name.clone(), indicator);
        }
        Ok(name)
    }

    /// Keep only `names`, in the given order.
    pub fn restricted_to(&self, names: &[String]) -> Result<Catalog> {
        let mut restricted = Catalog::new();
        for name in names {
            let indicator = self.resolve(name)?;
            if !restricted.entries.contains_key(name) {
                restricted.order.push(name.clone());
                restricted.entries.insert(name.clone(), indicator.clone());
            }
        }
        Ok(restricted)
    }

    pub fn resolve(&self, name: &str) -> Result<&Indicator> {
        self.entries
            .get(name)
            .ok_or_else(|| IndicatorError::UnknownIndicator(name.to_string()))
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Resolve `name` and make its columns present in `table`.
    pub fn ensure_named(&self, table: &mut PriceTable, name: &str) -> Result<&Indicator> {
        let indicator = self.resolve(name)?;
        ensure(table, indicator)?;
        Ok(indicator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::price_table::test_support::table_from_closes;

    #[test]
    fn dashboard_lists_thirteen_indicators() {
        let catalog = Catalog::dashboard();
        assert_eq!(catalog.names().len(), 13);
        assert_eq!(catalog.names()[0], "3 / 10 day Chaikin indicator");
        assert!(catalog.contains("21 day simple MA"));
        assert!(catalog.contains("Parabolic SAR"));
    }

    #[test]
    fn unknown_name_is_reported() {
        let catalog = Catalog::dashboard();
        assert_eq!(
            catalog.resolve("9 day Ichimoku").unwrap_err(),
            IndicatorError::UnknownIndicator("9 day Ichimoku".to_string())
        );
    }

    #[test]
    fn register_adds_custom_parameterisation() {
        let mut catalog = Catalog::dashboard();
        let name = catalog
            .register(Indicator::Ema {
                look_back: 50,
                field: PriceField::Close,
            })
            .unwrap();
        assert_eq!(name, "50 day EMA");
        assert_eq!(catalog.names().last().unwrap(), "50 day EMA");

        // Same descriptor again does not duplicate the entry.
        catalog
            .register(Indicator::Ema {
                look_back: 50,
                field: PriceField::Close,
            })
            .unwrap();
        assert_eq!(catalog.names().len(), 14);

        assert!(catalog.register(Indicator::Bollinger { look_back: 1 }).is_err());
    }

    #[test]
    fn restriction_keeps_requested_order() {
        let catalog = Catalog::dashboard();
        let names = vec!["21 day EMA".to_string(), "14 day RSI".to_string()];
        let restricted = catalog.restricted_to(&names).unwrap();
        assert_eq!(restricted.names(), names.as_slice());
        assert!(!restricted.contains("21 day DEMA"));

        let bad = vec!["bogus".to_string()];
        assert!(matches!(
            catalog.restricted_to(&bad),
            Err(IndicatorError::UnknownIndicator(_))
        ));
    }

    #[test]
    fn ensure_named_computes_columns() {
        let closes: Vec<f64> = (0..30).map(|i| 10.0 + i as f64).collect();
        let mut table = table_from_closes(&closes);
        let catalog = Catalog::dashboard();
        let indicator = catalog.ensure_named(&mut table, "21 day EMA").unwrap();
        assert!(!indicator.separate_panel());
        assert!(table.has_column("21 day EMA"));
        assert!(table.has_column("21 day simple MA"));
    }
}
