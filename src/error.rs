//! Error types for rs-crawlkit.
//!
//! This module defines the errors raised while validating request
//! configuration, fetching a page and extracting from it.

use serde::{Deserialize, Serialize};

/// Error type for discovery and scrape operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The fetch collaborator reported failure or could not be reached.
    #[error("{0}")]
    FetchFailed(String),

    /// Normalized content is shorter than the configured minimum.
    #[error("Insufficient content (only {observed} chars, minimum {required})")]
    InsufficientContent {
        /// Character count of the normalized content.
        observed: usize,
        /// Configured `minContentLength`.
        required: usize,
    },

    /// A CSS selector could not be parsed.
    #[error("Invalid CSS selector: {selector:?}")]
    InvalidSelector {
        /// The offending selector as supplied.
        selector: String,
    },

    /// A URL or text pattern is not a valid regular expression.
    #[error("Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The offending pattern as supplied.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A configuration value is out of range or malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Any other failure during parsing or selection.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Classify this error into the reporting taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::FetchFailed(_) => ErrorKind::FetchFailed,
            Self::InsufficientContent { .. } => ErrorKind::InsufficientContent,
            Self::InvalidSelector { .. } | Self::InvalidPattern { .. } => ErrorKind::SelectorError,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
            Self::Unexpected(_) => ErrorKind::UnexpectedError,
        }
    }
}

/// Error category reported alongside the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The page could not be fetched.
    FetchFailed,
    /// Content was extracted but is too short.
    InsufficientContent,
    /// A CSS selector or regex pattern is malformed.
    SelectorError,
    /// A configuration value or the request URL is invalid.
    InvalidConfig,
    /// Anything else, including a panicked extraction.
    UnexpectedError,
}

/// Result type alias for crawlkit operations.
pub type Result<T> = std::result::Result<T, Error>;
