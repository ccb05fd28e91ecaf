use crate::utils::error::Result;
use serde::Serialize;
use std::fmt;

/// A package name that passed [`validate_package_id`](crate::utils::validation::validate_package_id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PackageIdentifier(String);

impl PackageIdentifier {
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PackageIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything scraped from one listing page. `None` means the page did not
/// carry the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub cover_image_url: Option<String>,
    pub description: Option<String>,
    pub screenshot_urls: Vec<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub year: Option<String>,
    pub os_requirement: Option<String>,
}

impl ListingRecord {
    /// Number of the seven fields that were found (screenshots count once if non-empty).
    pub fn found_fields(&self) -> usize {
        [
            self.cover_image_url.is_some(),
            self.description.is_some(),
            !self.screenshot_urls.is_empty(),
            self.title.is_some(),
            self.category.is_some(),
            self.year.is_some(),
            self.os_requirement.is_some(),
        ]
        .into_iter()
        .filter(|found| *found)
        .count()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersistReport {
    pub directory: String,
    pub written: Vec<String>,
    /// Asset URLs that failed and were skipped under the skip policy.
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOutcome {
    pub id: PackageIdentifier,
    pub url: String,
    pub record: ListingRecord,
    pub report: Option<PersistReport>,
}
