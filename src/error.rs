use thiserror::Error;

/// Error types for stayscrape
///
/// Field, card, and page level faults are absorbed inside the extraction
/// pipeline and never surface as crate errors; only the faults that make a
/// run impossible (session creation, configuration, export I/O) live here.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("WebDriver session could not be created: {message}")]
    SessionInit { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create a session-initialization error
    pub fn session_init(message: impl Into<String>) -> Self {
        Self::SessionInit { message: message.into() }
    }

    /// Create an export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export { message: message.into() }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::SessionInit { .. } => "session",
            Self::Export { .. } | Self::Io(_) => "export",
        }
    }

    /// True for faults that abort the run before any traversal happens.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SessionInit { .. } | Self::Configuration { .. })
    }
}

/// Result type alias for stayscrape
pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;
