//! Field extraction rules for a parsed listing page.
//!
//! Every extractor is independent: a missing marker yields `None` (or an empty
//! list for screenshots) plus a warning, never an error.

use crate::core::document::{attr_of, first_within, text_of, Document, Marker};
use crate::domain::model::ListingRecord;
use crate::utils::error::Result;

pub const COVER_WRAPPER: Marker = Marker::class("div", &["cover-container"]);
pub const COVER_IMAGE: Marker = Marker::class("img", &["cover-image"]);
pub const DESCRIPTION_CONTAINER: Marker = Marker::class("div", &["show-more-content", "text-body"]);
pub const DESCRIPTION_TEXT: Marker = Marker::attr("div", "jsname", "C4s9Ed");
pub const TITLE: Marker = Marker::class("div", &["id-app-title"]);
pub const CATEGORY: Marker = Marker::attr("span", "itemprop", "genre");
pub const PUBLISHED: Marker = Marker::attr("div", "itemprop", "datePublished");
pub const OS_REQUIREMENT: Marker = Marker::attr("div", "itemprop", "operatingSystems");
pub const SCREENSHOT: Marker = Marker::class("img", &["full-screenshot"]);

// 頁面上的圖片網址省略了 scheme
const SCHEME: &str = "https:";
const YEAR_WIDTH: usize = 4;

fn with_scheme(src: &str) -> String {
    format!("{}{}", SCHEME, src)
}

// 查詢錯誤只記錄，不中斷其他欄位
fn settle<T>(field: &str, lookup: Result<Option<T>>) -> Option<T> {
    match lookup {
        Ok(Some(value)) => {
            tracing::info!("✅ {} found", field);
            Some(value)
        }
        Ok(None) => {
            tracing::warn!("{} not found!", field);
            None
        }
        Err(e) => {
            tracing::error!("{} lookup failed: {}", field, e);
            None
        }
    }
}

pub fn extract_cover_image(doc: &Document) -> Option<String> {
    let lookup = doc.find_last(&COVER_WRAPPER).and_then(|wrapper| match wrapper {
        Some(wrapper) => Ok(first_within(wrapper, &COVER_IMAGE)?
            .and_then(|img| attr_of(img, "src"))
            .map(with_scheme)),
        None => Ok(None),
    });
    settle("Cover image", lookup)
}

pub fn extract_description(doc: &Document) -> Option<String> {
    let lookup = doc
        .find_first(&DESCRIPTION_CONTAINER)
        .and_then(|container| match container {
            Some(container) => Ok(first_within(container, &DESCRIPTION_TEXT)?.map(text_of)),
            None => Ok(None),
        });
    settle("Description", lookup)
}

pub fn extract_title(doc: &Document) -> Option<String> {
    settle("Title", doc.find_first(&TITLE).map(|el| el.map(text_of)))
}

pub fn extract_category(doc: &Document) -> Option<String> {
    settle("Category", doc.find_first(&CATEGORY).map(|el| el.map(text_of)))
}

/// Last four characters of the publication-date text. Shorter text is
/// returned whole; the result is not guaranteed to be numeric.
pub fn extract_year(doc: &Document) -> Option<String> {
    let lookup = doc
        .find_first(&PUBLISHED)
        .map(|el| el.map(|el| year_suffix(&text_of(el))));
    settle("Year", lookup)
}

fn year_suffix(text: &str) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(YEAR_WIDTH)).collect()
}

pub fn extract_os_requirement(doc: &Document) -> Option<String> {
    settle(
        "OS requirement",
        doc.find_first(&OS_REQUIREMENT).map(|el| el.map(text_of)),
    )
}

pub fn extract_screenshots(doc: &Document) -> Vec<String> {
    match doc.find_all(&SCREENSHOT) {
        Ok(images) => {
            let urls: Vec<String> = images
                .into_iter()
                .filter_map(|img| attr_of(img, "src"))
                .filter(|src| !src.is_empty())
                .map(with_scheme)
                .collect();
            tracing::info!("✅ Screenshots found: {}", urls.len());
            urls
        }
        Err(e) => {
            tracing::error!("Screenshots lookup failed: {}", e);
            Vec::new()
        }
    }
}

/// Runs all seven extractors unconditionally.
pub fn extract_listing(doc: &Document) -> ListingRecord {
    ListingRecord {
        cover_image_url: extract_cover_image(doc),
        description: extract_description(doc),
        screenshot_urls: extract_screenshots(doc),
        title: extract_title(doc),
        category: extract_category(doc),
        year: extract_year(doc),
        os_requirement: extract_os_requirement(doc),
    }
}
