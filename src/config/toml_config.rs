use crate::core::persist::AssetFailurePolicy;
use crate::utils::error::{Result, ScrapeError};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Optional settings file; any key left out falls back to the CLI or the
/// built-in default.
///
/// ```toml
/// [storefront]
/// base_url = "https://play.google.com/store/apps/details"
/// timeout_seconds = 30
/// user_agent = "my-agent/1.0"
///
/// [output]
/// path = "${HOME}/listings"
/// save = true
/// on_asset_failure = "skip"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub storefront: StorefrontSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorefrontSection {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub path: Option<String>,
    pub save: Option<bool>,
    pub on_asset_failure: Option<AssetFailurePolicy>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content)
            .map_err(|e| ScrapeError::config("config_file", format!("TOML parsing error: {}", e)))
    }
}

/// Replaces `${VAR}` with the environment value; unknown variables are left as is.
fn substitute_env_vars(content: &str) -> String {
    let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}
