// =============================================================================
// Shared types used across the stockwatch engine
// =============================================================================

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IndicatorError;

/// One of the base numeric fields every price row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl PriceField {
    pub const ALL: [PriceField; 5] = [
        Self::Open,
        Self::High,
        Self::Low,
        Self::Close,
        Self::Volume,
    ];

    /// Column name under which the field is addressable in a price table.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::High => "High",
            Self::Low => "Low",
            Self::Close => "Close",
            Self::Volume => "Volume",
        }
    }

    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column_name() == name)
    }
}

impl Default for PriceField {
    fn default() -> Self {
        Self::Close
    }
}

impl std::fmt::Display for PriceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Time window a caller shows on the chart. Selecting rows is the caller's
/// job; the engine always computes over the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimePeriod {
    #[serde(rename = "1 year")]
    OneYear,
    #[serde(rename = "YTD")]
    YearToDate,
    #[serde(rename = "1 month")]
    OneMonth,
    #[serde(rename = "MTD")]
    MonthToDate,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 4] = [
        Self::OneYear,
        Self::YearToDate,
        Self::OneMonth,
        Self::MonthToDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::OneYear => "1 year",
            Self::YearToDate => "YTD",
            Self::OneMonth => "1 month",
            Self::MonthToDate => "MTD",
        }
    }
}

impl Default for TimePeriod {
    fn default() -> Self {
        Self::OneYear
    }
}

impl std::fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimePeriod {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| IndicatorError::InvalidParameter {
                indicator: "time period".to_string(),
                reason: format!("'{wanted}' is not one of 1 year, YTD, 1 month, MTD"),
            })
    }
}
