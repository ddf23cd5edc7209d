// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Algorithms are pure functions over row-aligned slices that return
// `Option<f64>` per row, `None` marking warm-up. `engine::ensure` is the only
// place that writes their output into a `PriceTable`.

pub mod adx;
pub mod aroon;
pub mod bollinger;
pub mod catalog;
pub mod chaikin;
pub mod descriptor;
pub mod engine;
pub mod fibonacci;
pub mod macd;
pub mod moving_average;
pub mod psar;
pub mod rsi;
pub mod stochastic;

pub use catalog::{dashboard_indicators, Catalog};
pub use descriptor::Indicator;
pub use engine::ensure;
