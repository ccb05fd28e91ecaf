pub mod document;
pub mod engine;
pub mod extract;
pub mod fetch;
pub mod persist;
pub mod url;

pub use crate::domain::model::{ListingRecord, PackageIdentifier, PersistReport, ScrapeOutcome};
pub use crate::domain::ports::{ConfigProvider, PageFetcher, Storage};
pub use crate::utils::error::Result;
