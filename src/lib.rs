//! Pagelens: asynchronous web page analysis
//!
//! This crate implements a page analysis service that fetches a submitted URL,
//! extracts structural facts (title, markup version, login-form presence),
//! classifies its hyperlinks as internal or external, and probes every link
//! for breakage. Each analysis runs as a background job whose status and
//! results can be polled while verification is still in flight.

pub mod analyzer;
pub mod config;
pub mod job;
pub mod service;
pub mod storage;
pub mod verifier;

use thiserror::Error;

/// Main error type for Pagelens operations
#[derive(Debug, Error)]
pub enum PagelensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("No analysis record with id {0}")]
    RecordNotFound(i64),

    #[error("No live job with id {0}")]
    JobNotFound(i64),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Pagelens operations
pub type Result<T> = std::result::Result<T, PagelensError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use analyzer::{AnalysisReport, MarkupVersion};
pub use config::Config;
pub use job::{Job, JobRegistry, JobStatus};
pub use service::AnalysisService;
pub use storage::{AnalysisRecord, RecordStore, SqliteStore};
pub use verifier::BrokenLink;
