//! chart-model: data model and renderer-agnostic geometry for bar, line and
//! pie charts.
//!
//! `core` holds the series and chart data stores, `interaction` maps touches
//! back to data, `render` turns data into draw primitives and legend runs,
//! and `api` wires them together behind `ChartEngine`.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
