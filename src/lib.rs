pub mod config;
pub mod core;
pub mod domain;
pub mod sources;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{etl::EtlEngine, pipeline::LineupPipeline};
pub use sources::{bronze::StagedCsvSource, fetch::LineupFetcher};
pub use utils::error::{EtlError, Result};
