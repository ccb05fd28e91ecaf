use crate::core::document::Document;
use crate::core::extract::extract_listing;
use crate::core::persist::ListingWriter;
use crate::core::url::build_url;
use crate::domain::model::{ListingRecord, PackageIdentifier, ScrapeOutcome};
use crate::domain::ports::{ConfigProvider, PageFetcher, Storage};
use crate::utils::error::Result;
use crate::utils::validation::validate_package_id;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Created,
    Validated,
    Fetched,
    Parsed,
    Extracted,
    Persisted,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Created => "created",
            Stage::Validated => "validated",
            Stage::Fetched => "fetched",
            Stage::Parsed => "parsed",
            Stage::Extracted => "extracted",
            Stage::Persisted => "persisted",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Runs one scrape: validate, fetch, parse, extract, then optionally persist.
pub struct ScrapeEngine<F: PageFetcher, S: Storage, C: ConfigProvider> {
    fetcher: F,
    storage: S,
    config: C,
}

impl<F: PageFetcher, S: Storage, C: ConfigProvider> ScrapeEngine<F, S, C> {
    pub fn new(fetcher: F, storage: S, config: C) -> Self {
        Self {
            fetcher,
            storage,
            config,
        }
    }

    fn advance(stage: &mut Stage, next: Stage) {
        tracing::debug!("stage {} -> {}", stage, next);
        *stage = next;
    }

    pub async fn run(&self, candidate: &str) -> Result<ScrapeOutcome> {
        let mut stage = Stage::Created;
        tracing::info!("Starting scrape for '{}'", candidate);

        let id = validate_package_id(candidate)?;
        Self::advance(&mut stage, Stage::Validated);
        tracing::info!("Initialised with package name: {}", id);

        let url = build_url(self.config.storefront_base(), &id)?;
        let body = self.fetcher.fetch(&url).await?;
        Self::advance(&mut stage, Stage::Fetched);
        tracing::info!("✅ Fetched storefront page ({} bytes): {}", body.len(), url);

        let record = self.parse_and_extract(&body, &mut stage)?;
        tracing::info!("Extracted {}/7 fields", record.found_fields());

        let report = if self.config.save() {
            let report = self.persist(&id, &record).await?;
            Self::advance(&mut stage, Stage::Persisted);
            Some(report)
        } else {
            tracing::debug!("Saving disabled, skipping persistence");
            None
        };

        Self::advance(&mut stage, Stage::Done);
        Ok(ScrapeOutcome {
            id,
            url,
            record,
            report,
        })
    }

    // Document 不是 Send，萃取完就釋放，不跨越 await
    fn parse_and_extract(&self, body: &[u8], stage: &mut Stage) -> Result<ListingRecord> {
        let doc = Document::parse(body)?;
        Self::advance(stage, Stage::Parsed);

        let record = extract_listing(&doc);
        Self::advance(stage, Stage::Extracted);
        Ok(record)
    }

    async fn persist(
        &self,
        id: &PackageIdentifier,
        record: &ListingRecord,
    ) -> Result<crate::domain::model::PersistReport> {
        let writer = ListingWriter::new(
            &self.storage,
            &self.fetcher,
            self.config.asset_failure_policy(),
        );
        let report = writer.persist(id, record).await?;
        tracing::info!(
            "📁 Saved {} files to {}/{}",
            report.written.len(),
            self.config.output_path(),
            report.directory
        );
        Ok(report)
    }
}
