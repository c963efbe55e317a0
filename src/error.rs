//! Custom error types for cv-screen
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Broad classification of a [`ScreenError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network unreachable, non-2xx status, or a backend-reported error
    Transport,
    /// Malformed response body
    Decode,
    /// Rejected user input; no request was made
    Validation,
    /// Local configuration, filesystem or terminal failure
    Local,
}

/// Main error type for the cv-screen application
#[derive(Error, Debug)]
pub enum ScreenError {
    /// Request never produced a response
    #[error("Could not reach the screening API: {0}\n\n  → Check that the backend is running and the API base URL is correct ('cvs config get api-base').")]
    Transport(String),

    /// Backend answered with a non-2xx status
    #[error("Screening API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Backend answered 2xx but reported an error in the body
    #[error("Screening API reported an error: {0}")]
    Backend(String),

    /// Response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Screening was triggered without a job posting URL
    #[error("Please enter a job URL.\n\n  → Provide the URL of the job posting to screen resumes against.")]
    EmptyJobReference,

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API base URL could not be parsed
    #[error("Invalid API base URL: {0}\n\n  → Expected something like http://localhost:8000")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Terminal/TUI error
    #[error("Terminal error: {0}\n\n  → Try resizing your terminal or restarting it.")]
    Terminal(String),
}

impl ScreenError {
    /// Classify the error for callers that treat whole groups alike
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScreenError::Transport(_) | ScreenError::Status { .. } | ScreenError::Backend(_) => {
                ErrorCategory::Transport
            }
            ScreenError::Decode(_) => ErrorCategory::Decode,
            ScreenError::EmptyJobReference | ScreenError::InvalidInput(_) => {
                ErrorCategory::Validation
            }
            ScreenError::Config(_)
            | ScreenError::InvalidUrl(_)
            | ScreenError::Io(_)
            | ScreenError::Toml(_)
            | ScreenError::Terminal(_) => ErrorCategory::Local,
        }
    }

    /// One-line form for status bars and log fields
    pub fn summary(&self) -> String {
        self.to_string()
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

impl From<reqwest::Error> for ScreenError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ScreenError::Decode(err.to_string())
        } else {
            ScreenError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ScreenError {
    fn from(err: serde_json::Error) -> Self {
        ScreenError::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for ScreenError {
    fn from(err: toml::de::Error) -> Self {
        ScreenError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for ScreenError {
    fn from(err: toml::ser::Error) -> Self {
        ScreenError::Toml(err.to_string())
    }
}

/// Result type alias using ScreenError
pub type Result<T> = std::result::Result<T, ScreenError>;
