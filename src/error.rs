//! Error types for Blogcast
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Blogcast operations
///
/// This enum covers configuration loading, the external services, artifact
/// reads, archive export, and file system access on a named path.
#[derive(Error, Debug)]
pub enum BlogcastError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL failed validation before any request was made
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    /// An API key required by a service is not configured
    #[error("Missing credentials: {0} is not set")]
    MissingCredentials(String),

    /// Scraping service errors
    #[error("Scrape error: {0}")]
    Scrape(String),

    /// Text generation errors
    #[error("Script generation error: {0}")]
    ScriptGeneration(String),

    /// Speech synthesis errors
    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    /// Authentication errors (e.g., 401 Unauthorized)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Rate limit reported by a remote service
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Per-file read failure for a single audio artifact
    #[error("Artifact error for {}: {message}", path.display())]
    Artifact {
        /// The artifact that could not be read
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// No session with the requested key exists
    #[error("No episode named '{0}'")]
    SessionNotFound(String),

    /// Archive export errors
    #[error("Export error: {0}")]
    Export(String),

    /// A conversion stage failed; files written before the failure are listed
    #[error("Conversion failed during {stage}: {source}")]
    Conversion {
        /// Pipeline stage that failed
        stage: String,
        /// Underlying failure, still downcastable to `BlogcastError`
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        /// Files written before the failure
        partial_artifacts: Vec<PathBuf>,
    },

    /// File system error on a specific path
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File or directory being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl BlogcastError {
    /// Wrap an IO error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The service error behind a failed conversion, if there is one
    pub fn conversion_cause(&self) -> Option<&BlogcastError> {
        match self {
            Self::Conversion { source, .. } => source.downcast_ref::<BlogcastError>(),
            _ => None,
        }
    }
}

/// Result type alias for Blogcast operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
