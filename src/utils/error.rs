use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Invalid package name '{input}': {reason}")]
    Validation { input: String, reason: String },

    #[error("Failed to fetch {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse page: {reason}")]
    Parse { reason: String },

    #[error("Failed to save asset {url} as {file}: {source}")]
    AssetDownload {
        url: String,
        file: String,
        #[source]
        source: Box<ScrapeError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    Config { field: String, message: String },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Parsing,
    Storage,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn validation(input: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn config(field: &str, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Input,
            Self::Fetch { .. } | Self::Http(_) => ErrorCategory::Network,
            Self::Parse { .. } => ErrorCategory::Parsing,
            Self::AssetDownload { source, .. } => match source.category() {
                ErrorCategory::Storage => ErrorCategory::Storage,
                _ => ErrorCategory::Network,
            },
            Self::Io(_) | Self::Serialization(_) => ErrorCategory::Storage,
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::Selector { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Parsing | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::Storage | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI; library code never exits on its own.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Package names look like com.example.app: dot-separated segments of letters, digits and underscores, each starting with a letter or underscore"
            }
            ErrorCategory::Network => {
                "Check the network connection and that the app is published on the storefront, then retry"
            }
            ErrorCategory::Parsing => "The storefront returned an unexpected page; retry later",
            ErrorCategory::Storage => "Check that the output directory is writable and has free space",
            ErrorCategory::Configuration => "Fix the configuration value and run again",
            ErrorCategory::Internal => "This is a bug; please report it with the package name used",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Validation { input, .. } => format!("'{}' is not a valid package name", input),
            Self::Fetch { status: 404, .. } => "App not found on the storefront".to_string(),
            Self::Fetch { status, .. } => format!("Storefront responded with HTTP {}", status),
            Self::Http(_) => "Could not reach the storefront".to_string(),
            Self::Parse { .. } => "Could not read the storefront page".to_string(),
            Self::AssetDownload { file, .. } => format!("Could not save {}", file),
            Self::Io(e) => format!("File system error: {}", e),
            Self::Serialization(_) => "Could not serialize the listing".to_string(),
            Self::Config { field, message } => format!("Bad setting {}: {}", field, message),
            Self::Selector { .. } => "Internal selector error".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
