use crate::config::types::{Config, FetchConfig, StorageConfig, VerifierConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_verifier_config(&config.verifier)?;
    validate_storage_config(&config.storage)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates verifier configuration
fn validate_verifier_config(config: &VerifierConfig) -> Result<(), ConfigError> {
    if config.probe_timeout_secs < 1 || config.probe_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "probe_timeout_secs must be between 1 and 300, got {}",
            config.probe_timeout_secs
        )));
    }

    if config.max_concurrent_probes < 1 || config.max_concurrent_probes > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_probes must be between 1 and 100, got {}",
            config.max_concurrent_probes
        )));
    }

    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
