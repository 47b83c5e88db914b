pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::AtlasConfig;
pub use core::{aggregator::GeoAggregator, engine::AtlasEngine, location::LocationResolver};
pub use utils::error::{AtlasError, Result};
