use crate::domain::model::PackageIdentifier;
use crate::utils::error::{Result, ScrapeError};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

// 每段以字母或底線開頭，段與段之間以單一 '.' 連接，必須完整比對
const PACKAGE_ID_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$";

fn package_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PACKAGE_ID_PATTERN).expect("package id pattern is valid"))
}

/// Checks a candidate package name against the dotted-segment grammar and
/// returns it unchanged as a [`PackageIdentifier`].
pub fn validate_package_id(candidate: &str) -> Result<PackageIdentifier> {
    if candidate.is_empty() {
        return Err(ScrapeError::validation(candidate, "package name cannot be empty"));
    }

    if package_id_regex().is_match(candidate) {
        tracing::debug!("Package name accepted: {}", candidate);
        return Ok(PackageIdentifier::new_unchecked(candidate.to_string()));
    }

    Err(ScrapeError::validation(candidate, describe_violation(candidate)))
}

// 只用於錯誤訊息，判斷結果以正規表達式為準
fn describe_violation(candidate: &str) -> String {
    if let Some(c) = candidate
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '.'))
    {
        return format!("invalid character {:?}", c);
    }
    if candidate.starts_with('.') || candidate.ends_with('.') {
        return "leading or trailing dot".to_string();
    }
    if candidate.contains("..") {
        return "empty segment between consecutive dots".to_string();
    }
    match candidate
        .split('.')
        .find(|segment| segment.starts_with(|c: char| c.is_ascii_digit()))
    {
        Some(segment) => format!("segment '{}' starts with a digit", segment),
        None => "does not match the package name grammar".to_string(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ScrapeError::config(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ScrapeError::config(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(ScrapeError::config(
            field_name,
            format!("Invalid URL format '{}': {}", url_str, e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScrapeError::config(field_name, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(ScrapeError::config(field_name, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ScrapeError::config(
            field_name,
            format!("Value {} must be between {} and {}", value, min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_package_ids_are_returned_unchanged() {
        for id in [
            "com.example.app",
            "a",
            "_private",
            "Com.Example.App2",
            "com.icicibank.pockets",
            "org.test_app.v2_beta",
            "A.B.C",
        ] {
            let parsed = validate_package_id(id).unwrap();
            assert_eq!(parsed.as_str(), id);
        }
    }

    #[test]
    fn test_invalid_package_ids_are_rejected() {
        for id in [
            "",
            "1com.example",
            "com.1example",
            "com..example",
            ".com.example",
            "com.example.",
            "com-example",
            "com.example app",
            "com.exämple",
            "com.example/../etc",
            "com.example\n",
        ] {
            assert!(
                matches!(validate_package_id(id), Err(ScrapeError::Validation { .. })),
                "{:?} should be rejected",
                id
            );
        }
    }

    #[test]
    fn test_violation_reason_names_the_problem() {
        let err = validate_package_id("com.9lives").unwrap_err();
        assert!(err.to_string().contains("starts with a digit"));

        let err = validate_package_id("com..x").unwrap_err();
        assert!(err.to_string().contains("consecutive dots"));

        let err = validate_package_id("com.x-y").unwrap_err();
        assert!(err.to_string().contains("invalid character"));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("storefront_base", "https://example.com").is_ok());
        assert!(validate_url("storefront_base", "http://example.com").is_ok());
        assert!(validate_url("storefront_base", "").is_err());
        assert!(validate_url("storefront_base", "invalid-url").is_err());
        assert!(validate_url("storefront_base", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("timeout_seconds", 30u64, 1, 300).is_ok());
        assert!(validate_range("timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("timeout_seconds", 301u64, 1, 300).is_err());
    }
}
