use crate::domain::model::PackageIdentifier;
use crate::utils::error::{Result, ScrapeError};
use url::Url;

pub const DEFAULT_STOREFRONT_BASE: &str = "https://play.google.com/store/apps/details";

// 強制英文頁面，萃取規則依賴英文標記
const LANGUAGE: &str = "en";

/// Listing URL for `id` under `base`, e.g.
/// `https://play.google.com/store/apps/details?id=com.example.app&hl=en`.
///
/// Any query already present on `base` is replaced.
pub fn build_url(base: &str, id: &PackageIdentifier) -> Result<String> {
    let mut url = Url::parse(base).map_err(|e| {
        ScrapeError::config("storefront_base", format!("Invalid URL '{}': {}", base, e))
    })?;

    url.query_pairs_mut()
        .clear()
        .append_pair("id", id.as_str())
        .append_pair("hl", LANGUAGE);

    Ok(url.into())
}
