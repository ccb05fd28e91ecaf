pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, Settings};
pub use core::{engine::ScrapeEngine, fetch::HttpFetcher, persist::AssetFailurePolicy};
pub use domain::model::{ListingRecord, PackageIdentifier, ScrapeOutcome};
pub use utils::error::{Result, ScrapeError};
