//! Configuration module for Pagelens
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every field carries a default, so the service also runs without a config file.
//!
//! # Example
//!
//! ```no_run
//! use pagelens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Probe timeout: {}s", config.verifier.probe_timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, StorageConfig, VerifierConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
