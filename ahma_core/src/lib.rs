pub mod analyzer;
pub mod common;
pub mod config;
pub mod math;

pub use analyzer::analyzer::{calculate_ahma, sanitize, AhmaSeries, Analyzer};
pub use common::ahma_error::{AhmaError, ErrCode};
pub use config::ahma_config::{AhmaConfig, PartialConfig};
