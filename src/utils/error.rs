use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Tag not found: {selector}")]
    TagNotFound { selector: String },

    #[error("Section not found: {section}")]
    SectionNotFound { section: String },

    #[error("Request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Unexpected status code: {code:?}")]
    UnexpectedStatusCode { code: String },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Markup,
    Network,
    Reconciliation,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TagNotFound { .. } | Self::SectionNotFound { .. } | Self::Selector { .. } => {
                ErrorCategory::Markup
            }
            Self::Fetch { .. } | Self::HttpStatus { .. } | Self::UrlError(_) => {
                ErrorCategory::Network
            }
            Self::UnexpectedStatusCode { .. } => ErrorCategory::Reconciliation,
            Self::ZipError(_)
            | Self::CsvError(_)
            | Self::IoError(_)
            | Self::SerializationError(_) => ErrorCategory::Storage,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Reconciliation => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Markup | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// Whether this is one of the "required markup is missing" errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TagNotFound { .. } | Self::SectionNotFound { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Markup => format!("The page layout was not recognised: {}", self),
            ErrorCategory::Network => format!("Could not download a page: {}", self),
            ErrorCategory::Reconciliation => format!("Unexpected proposal data: {}", self),
            ErrorCategory::Storage => format!("Could not save results: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Markup => {
                "The site markup may have changed; try again with --clear-cache"
            }
            ErrorCategory::Network => "Check your network connection and the target URLs",
            ErrorCategory::Reconciliation => "Review the [expected_status] table in your settings",
            ErrorCategory::Storage => "Check that the output directories are writable",
            ErrorCategory::Configuration => "Run with --help to see the accepted options",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
