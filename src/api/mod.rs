mod engine;
mod engine_config;
mod json_contract;
mod validation;

pub use engine::ChartEngine;
pub use engine_config::{ChartEngineConfig, PieConfig};
pub use json_contract::{ChartEngineConfigJsonContractV1, ENGINE_CONFIG_JSON_SCHEMA_V1};
