pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::SqlxStore;
pub use config::toml_config::TomlConfig;
pub use crate::core::{engine::InsertEngine, pipeline::GuestPipeline};
pub use domain::model::{Guest, InsertReport};
pub use utils::error::{LoaderError, Result};
