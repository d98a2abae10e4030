//! Error types for pagesweep
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for pagesweep
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Fetch Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Traversal Errors
    // ============================================================================
    #[error("Pagination failed at {url}: {source}")]
    Pagination {
        url: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Cursor cycle detected: {url} was already fetched")]
    CursorCycle { url: String },

    #[error("Page limit ({max_pages}) exceeded")]
    PageLimitExceeded { max_pages: usize },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of a non-2xx status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 404, the resource is definitively absent
    NotFound,
    /// 500-599, eligible for retry
    ServerError,
    /// Anything else
    Other,
}

impl StatusClass {
    /// Classify a raw status code
    pub fn of(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            500..=599 => Self::ServerError,
            _ => Self::Other,
        }
    }
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Wrap an error with the URL of the page that failed
    pub fn pagination(url: impl Into<String>, source: Error) -> Self {
        Self::Pagination {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_) | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => StatusClass::of(*status) == StatusClass::ServerError,
            _ => false,
        }
    }

    /// Status classification, if this is an HTTP status error
    pub fn status_class(&self) -> Option<StatusClass> {
        match self {
            Error::HttpStatus { status, .. } => Some(StatusClass::of(*status)),
            _ => None,
        }
    }
}

/// Result type alias for pagesweep
pub type Result<T> = std::result::Result<T, Error>;
