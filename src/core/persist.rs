use crate::domain::model::{ListingRecord, PackageIdentifier, PersistReport};
use crate::domain::ports::{PageFetcher, Storage};
use crate::utils::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const COVER_FILE: &str = "cover_image.png";
pub const DESCRIPTION_FILE: &str = "desc";

/// What to do when one image cannot be downloaded or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFailurePolicy {
    #[default]
    Abort,
    Skip,
}

impl FromStr for AssetFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown asset failure policy '{}' (abort|skip)", other)),
        }
    }
}

/// Screenshot file name; images are saved as `.png` whatever their real format.
pub fn screenshot_file(index: usize) -> String {
    format!("s{}.png", index)
}

/// Writes one listing into a directory named after the package.
pub struct ListingWriter<'a, S: Storage, F: PageFetcher> {
    storage: &'a S,
    fetcher: &'a F,
    policy: AssetFailurePolicy,
}

impl<'a, S: Storage, F: PageFetcher> ListingWriter<'a, S, F> {
    pub fn new(storage: &'a S, fetcher: &'a F, policy: AssetFailurePolicy) -> Self {
        Self {
            storage,
            fetcher,
            policy,
        }
    }

    pub async fn persist(
        &self,
        id: &PackageIdentifier,
        record: &ListingRecord,
    ) -> Result<PersistReport> {
        let dir = id.as_str();
        let mut report = PersistReport {
            directory: dir.to_string(),
            ..Default::default()
        };

        self.storage.prepare_dir(dir).await?;
        tracing::debug!("Prepared output directory {}", dir);

        match &record.cover_image_url {
            Some(url) => {
                self.save_asset(dir, url, COVER_FILE, &mut report).await?;
            }
            None => tracing::info!("No cover image to save"),
        }

        // 檔名依成功儲存的順序編號，保持 s0, s1, ... 連續
        let mut saved = 0;
        for url in &record.screenshot_urls {
            if self
                .save_asset(dir, url, &screenshot_file(saved), &mut report)
                .await?
            {
                saved += 1;
            }
        }
        tracing::info!(
            "Saved {}/{} screenshots",
            saved,
            record.screenshot_urls.len()
        );

        match &record.description {
            Some(text) => {
                let path = format!("{}/{}", dir, DESCRIPTION_FILE);
                self.storage.write_file(&path, text.as_bytes()).await?;
                report.written.push(DESCRIPTION_FILE.to_string());
                tracing::info!("✅ Description saved ({} bytes)", text.len());
            }
            None => tracing::warn!("No description to save, skipping {}", DESCRIPTION_FILE),
        }

        Ok(report)
    }

    /// Returns `Ok(false)` when the asset failed and the skip policy let it go.
    async fn save_asset(
        &self,
        dir: &str,
        url: &str,
        file: &str,
        report: &mut PersistReport,
    ) -> Result<bool> {
        match self.download(dir, url, file).await {
            Ok(()) => {
                tracing::info!("✅ Saved {}", file);
                report.written.push(file.to_string());
                Ok(true)
            }
            Err(e) => {
                let err = ScrapeError::AssetDownload {
                    url: url.to_string(),
                    file: file.to_string(),
                    source: Box::new(e),
                };
                match self.policy {
                    AssetFailurePolicy::Abort => Err(err),
                    AssetFailurePolicy::Skip => {
                        tracing::warn!("Skipping asset: {}", err);
                        report.skipped.push(url.to_string());
                        Ok(false)
                    }
                }
            }
        }
    }

    async fn download(&self, dir: &str, url: &str, file: &str) -> Result<()> {
        let bytes = self.fetcher.fetch(url).await?;
        self.storage
            .write_file(&format!("{}/{}", dir, file), &bytes)
            .await
    }
}
