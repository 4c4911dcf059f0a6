use serde::Deserialize;

/// Main configuration structure for Pagelens
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub verifier: VerifierConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Primary page fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Overall timeout for the primary page fetch (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Link verification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct VerifierConfig {
    /// Timeout for each individual link probe (seconds)
    #[serde(rename = "probe-timeout-secs", default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Maximum number of link probes in flight at once
    #[serde(rename = "max-concurrent-probes", default = "default_max_probes")]
    pub max_concurrent_probes: usize,
}

/// Record store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "pagelens/0.1".to_string()
}

fn default_probe_timeout() -> u64 {
    10
}

fn default_max_probes() -> usize {
    16
}

fn default_database_path() -> String {
    "./pagelens.db".to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: default_probe_timeout(),
            max_concurrent_probes: default_max_probes(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}
