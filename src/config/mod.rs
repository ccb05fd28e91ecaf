pub mod cli;
pub mod toml_config;

use crate::core::fetch::DEFAULT_USER_AGENT;
use crate::core::persist::AssetFailurePolicy;
use crate::core::url::DEFAULT_STOREFRONT_BASE;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use serde::Serialize;
use std::time::Duration;
use toml_config::FileConfig;

#[cfg(feature = "cli")]
use clap::Parser;

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub storefront_base: String,
    pub output_path: String,
    pub save: bool,
    pub asset_failure_policy: AssetFailurePolicy,
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storefront_base: DEFAULT_STOREFRONT_BASE.to_string(),
            output_path: ".".to_string(),
            save: true,
            asset_failure_policy: AssetFailurePolicy::default(),
            timeout_seconds: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Settings {
    pub fn apply_file(mut self, file: &FileConfig) -> Self {
        if let Some(base) = &file.storefront.base_url {
            self.storefront_base = base.clone();
        }
        if let Some(timeout) = file.storefront.timeout_seconds {
            self.timeout_seconds = Some(timeout);
        }
        if let Some(agent) = &file.storefront.user_agent {
            self.user_agent = agent.clone();
        }
        if let Some(path) = &file.output.path {
            self.output_path = path.clone();
        }
        if let Some(save) = file.output.save {
            self.save = save;
        }
        if let Some(policy) = file.output.on_asset_failure {
            self.asset_failure_policy = policy;
        }
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl ConfigProvider for Settings {
    fn storefront_base(&self) -> &str {
        &self.storefront_base
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn save(&self) -> bool {
        self.save
    }

    fn asset_failure_policy(&self) -> AssetFailurePolicy {
        self.asset_failure_policy
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("storefront_base", &self.storefront_base)?;
        validate_path("output_path", &self.output_path)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "playstore-scrape")]
#[command(about = "Scrape one app listing from the Play Store and save its assets")]
#[command(version)]
pub struct CliConfig {
    /// Package name, e.g. com.example.app
    pub package: String,

    /// TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Storefront details URL (id and hl are appended)
    #[arg(long)]
    pub storefront_base: Option<String>,

    /// Directory under which the <package> folder is created
    #[arg(short, long)]
    pub output_path: Option<String>,

    /// Only print the listing, write nothing to disk
    #[arg(long)]
    pub no_save: bool,

    /// abort | skip
    #[arg(long)]
    pub on_asset_failure: Option<AssetFailurePolicy>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// Print the listing as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Defaults, then the settings file, then command-line flags.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();
        if let Some(path) = &self.config {
            tracing::debug!("Loading settings from {}", path);
            settings = settings.apply_file(&FileConfig::from_file(path)?);
        }

        if let Some(base) = &self.storefront_base {
            settings.storefront_base = base.clone();
        }
        if let Some(path) = &self.output_path {
            settings.output_path = path.clone();
        }
        if self.no_save {
            settings.save = false;
        }
        if let Some(policy) = self.on_asset_failure {
            settings.asset_failure_policy = policy;
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout_seconds = Some(timeout);
        }
        if let Some(agent) = &self.user_agent {
            settings.user_agent = agent.clone();
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.save);
        assert_eq!(settings.asset_failure_policy, AssetFailurePolicy::Abort);
        assert_eq!(settings.timeout(), None);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = FileConfig::from_toml_str(
            "[storefront]\ntimeout_seconds = 15\n[output]\non_asset_failure = \"skip\"\n",
        )
        .unwrap();
        let settings = Settings::default().apply_file(&file);

        assert_eq!(settings.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(settings.asset_failure_policy, AssetFailurePolicy::Skip);
        assert_eq!(settings.storefront_base, DEFAULT_STOREFRONT_BASE);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = Settings {
            storefront_base: "ftp://store".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            timeout_seconds: Some(0),
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            output_path: String::new(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[output]\npath = \"from-file\"\nsave = true\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "playstore-scrape",
            "com.example.app",
            "--config",
            file.path().to_str().unwrap(),
            "--output-path",
            "from-cli",
            "--no-save",
            "--on-asset-failure",
            "skip",
        ]);
        let settings = cli.settings().unwrap();

        assert_eq!(cli.package, "com.example.app");
        assert_eq!(settings.output_path, "from-cli");
        assert!(!settings.save);
        assert_eq!(settings.asset_failure_policy, AssetFailurePolicy::Skip);
    }
}
