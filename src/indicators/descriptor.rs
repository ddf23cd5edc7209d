// =============================================================================
// Indicator descriptors
// =============================================================================
//
// One variant per supported computation, each carrying its own parameters.
// The canonical column name is derived from the parameters, so two different
// parameter sets never share a name and a present column can be trusted as
// the output of exactly this descriptor.

use serde::{Deserialize, Serialize};

use super::fibonacci;
use crate::error::{IndicatorError, Result};
use crate::types::PriceField;

pub const MACD_SIGNAL: usize = 9;
pub const STOCHASTIC_SIGNAL: usize = 3;
pub const PSAR_STEP: f64 = 0.02;
pub const PSAR_MAX_STEP: f64 = 0.2;

/// Suffix of the smoothed companion line (MACD signal, stochastic %D).
pub const MOVING_AVERAGE_SUFFIX: &str = " moving average";

fn default_macd_signal() -> usize {
    MACD_SIGNAL
}

fn default_stochastic_signal() -> usize {
    STOCHASTIC_SIGNAL
}

fn default_psar_step() -> f64 {
    PSAR_STEP
}

fn default_psar_max_step() -> f64 {
    PSAR_MAX_STEP
}

/// A named indicator computation together with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Indicator {
    Sma {
        look_back: usize,
        #[serde(default)]
        field: PriceField,
    },
    Ema {
        look_back: usize,
        #[serde(default)]
        field: PriceField,
    },
    /// EMA recurrence applied to the EMA series itself (DEMA's lag term).
    DoubleSmoothedEma {
        look_back: usize,
        #[serde(default)]
        field: PriceField,
    },
    Dema {
        look_back: usize,
        #[serde(default)]
        field: PriceField,
    },
    Lwma {
        look_back: usize,
        #[serde(default)]
        field: PriceField,
    },
    Macd {
        fast: usize,
        slow: usize,
        #[serde(default = "default_macd_signal")]
        signal: usize,
        #[serde(default)]
        field: PriceField,
    },
    Bollinger {
        look_back: usize,
    },
    Rsi {
        look_back: usize,
    },
    Adx {
        look_back: usize,
    },
    Stochastic {
        look_back: usize,
        #[serde(default = "default_stochastic_signal")]
        signal: usize,
    },
    Aroon {
        look_back: usize,
    },
    Chaikin {
        fast: usize,
        slow: usize,
    },
    ParabolicSar {
        #[serde(default = "default_psar_step")]
        step: f64,
        #[serde(default = "default_psar_max_step")]
        max_step: f64,
    },
    Fibonacci,
}

fn on_field(name: String, field: PriceField) -> String {
    if field == PriceField::Close {
        name
    } else {
        format!("{name} on {field}")
    }
}

fn with_signal(name: String, signal: usize, default: usize) -> String {
    if signal == default {
        name
    } else {
        format!("{name} ({signal} day signal)")
    }
}

impl Indicator {
    /// User-facing name, also the name of the main output column.
    pub fn name(&self) -> String {
        match *self {
            Self::Sma { look_back, field } => on_field(format!("{look_back} day simple MA"), field),
            Self::Ema { look_back, field } => on_field(format!("{look_back} day EMA"), field),
            Self::DoubleSmoothedEma { look_back, field } => {
                on_field(format!("{look_back} day double-smoothed EMA"), field)
            }
            Self::Dema { look_back, field } => on_field(format!("{look_back} day DEMA"), field),
            Self::Lwma { look_back, field } => on_field(format!("{look_back} day LWMA"), field),
            Self::Macd {
                fast,
                slow,
                signal,
                field,
            } => with_signal(
                on_field(format!("{fast} / {slow} day MACD"), field),
                signal,
                MACD_SIGNAL,
            ),
            Self::Bollinger { look_back } => format!("{look_back} day Bollinger bands"),
            Self::Rsi { look_back } => format!("{look_back} day RSI"),
            Self::Adx { look_back } => format!("{look_back} day ADX"),
            Self::Stochastic { look_back, signal } => with_signal(
                format!("{look_back} day stochastic oscillator"),
                signal,
                STOCHASTIC_SIGNAL,
            ),
            Self::Aroon { look_back } => format!("{look_back} day Aroon indicator"),
            Self::Chaikin { fast, slow } => format!("{fast} / {slow} day Chaikin indicator"),
            Self::ParabolicSar { step, max_step } => {
                if step == PSAR_STEP && max_step == PSAR_MAX_STEP {
                    "Parabolic SAR".to_string()
                } else {
                    format!("Parabolic SAR ({step} / {max_step})")
                }
            }
            Self::Fibonacci => "Fibonacci levels".to_string(),
        }
    }

    /// Every column the computation writes, main column first.
    pub fn output_columns(&self) -> Vec<String> {
        let name = self.name();
        match self {
            Self::Macd { .. } | Self::Stochastic { .. } => {
                let signal = format!("{name}{MOVING_AVERAGE_SUFFIX}");
                vec![name, signal]
            }
            Self::Bollinger { .. } => {
                let low = format!("{name}_low");
                let high = format!("{name}_high");
                let std = format!("{name}_std");
                vec![name, low, high, std]
            }
            Self::Aroon { .. } => {
                let up = format!("{name} up");
                let down = format!("{name} down");
                vec![name, up, down]
            }
            Self::Fibonacci => {
                let levels = fibonacci::LEVELS
                    .iter()
                    .filter(|(label, _)| *label != fibonacci::MAIN_LEVEL)
                    .map(|(label, _)| format!("{name} {label}"));
                std::iter::once(name.clone()).chain(levels).collect()
            }
            _ => vec![name],
        }
    }

    /// Indicators whose columns must exist before this one is computed.
    pub fn prerequisites(&self) -> Vec<Indicator> {
        match *self {
            Self::Ema { look_back, field } | Self::Lwma { look_back, field } => {
                vec![Self::Sma { look_back, field }]
            }
            Self::DoubleSmoothedEma { look_back, field } => vec![Self::Ema { look_back, field }],
            Self::Dema { look_back, field } => vec![
                Self::Ema { look_back, field },
                Self::DoubleSmoothedEma { look_back, field },
            ],
            Self::Macd {
                fast, slow, field, ..
            } => vec![
                Self::Ema {
                    look_back: fast,
                    field,
                },
                Self::Ema {
                    look_back: slow,
                    field,
                },
            ],
            _ => Vec::new(),
        }
    }

    /// First row of the main column that holds a value, given enough history.
    pub fn first_defined_row(&self) -> usize {
        match *self {
            Self::Sma { look_back, .. }
            | Self::Ema { look_back, .. }
            | Self::DoubleSmoothedEma { look_back, .. }
            | Self::Dema { look_back, .. }
            | Self::Lwma { look_back, .. }
            | Self::Bollinger { look_back }
            | Self::Stochastic { look_back, .. } => look_back.saturating_sub(1),
            Self::Macd { fast, slow, .. } | Self::Chaikin { fast, slow } => {
                fast.max(slow).saturating_sub(1)
            }
            Self::Rsi { look_back } | Self::Aroon { look_back } => look_back,
            Self::Adx { look_back } => look_back.saturating_mul(2).saturating_sub(1),
            Self::ParabolicSar { .. } => 1,
            Self::Fibonacci => 0,
        }
    }

    /// Oscillators are drawn below the price chart rather than on top of it.
    pub fn separate_panel(&self) -> bool {
        matches!(
            self,
            Self::Macd { .. }
                | Self::Rsi { .. }
                | Self::Adx { .. }
                | Self::Stochastic { .. }
                | Self::Aroon { .. }
                | Self::Chaikin { .. }
        )
    }

    /// Reject parameters the algorithm cannot work with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| {
            Err(IndicatorError::InvalidParameter {
                indicator: self.name(),
                reason: reason.to_string(),
            })
        };

        match *self {
            Self::Sma { look_back, .. }
            | Self::Ema { look_back, .. }
            | Self::DoubleSmoothedEma { look_back, .. }
            | Self::Dema { look_back, .. }
            | Self::Lwma { look_back, .. }
            | Self::Rsi { look_back }
            | Self::Adx { look_back }
            | Self::Aroon { look_back } => {
                if look_back == 0 {
                    return invalid("look-back must be at least 1");
                }
            }
            Self::Bollinger { look_back } => {
                if look_back < 2 {
                    return invalid("sample standard deviation needs a look-back of at least 2");
                }
            }
            Self::Macd {
                fast, slow, signal, ..
            } => {
                if fast == 0 || slow == 0 || signal == 0 {
                    return invalid("fast, slow and signal windows must be at least 1");
                }
            }
            Self::Stochastic { look_back, signal } => {
                if look_back == 0 || signal == 0 {
                    return invalid("look-back and signal windows must be at least 1");
                }
            }
            Self::Chaikin { fast, slow } => {
                if fast == 0 || slow == 0 {
                    return invalid("fast and slow windows must be at least 1");
                }
            }
            Self::ParabolicSar { step, max_step } => {
                if !(step > 0.0 && step <= max_step && max_step <= 1.0) {
                    return invalid("acceleration must satisfy 0 < step <= max step <= 1");
                }
            }
            Self::Fibonacci => {}
        }
        Ok(())
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
