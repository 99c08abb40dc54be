use serde::Deserialize;
use std::net::SocketAddr;

use crate::report::ReportMode;

/// Reference database configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Path prefix of the reference tables
    /// Each table is `<prefix><kind>.fdb`, e.g. "db/user-agent.fdb"
    /// Default: "db/"
    #[serde(default = "default_database_prefix")]
    pub prefix: String,
}

/// Report configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReportConfig {
    /// Report shape used when a caller does not ask for one:
    /// "besthit" (or "simple"), "besthitdetail", "list", "besthitlist"
    /// Unknown names fall back to "besthit"
    /// Default: "besthit"
    #[serde(default)]
    pub default_mode: ReportMode,
}

/// Recon service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address and port to listen on
    /// Default: "127.0.0.1:8088"
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Largest request head accepted, in bytes
    /// Default: 16384
    #[serde(default = "default_max_header_bytes")]
    pub max_header_bytes: usize,
    /// Time allowed to receive the request head, in milliseconds
    /// Default: 5000
    #[serde(default = "default_read_timeout")]
    pub read_timeout_ms: u64,
}

/// Contribution workflow configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ContributionConfig {
    /// Record samples sent with an `implementation` query parameter
    /// Default: false
    #[serde(default)]
    pub enabled: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    /// Default: "info"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Show module path (target) in log messages
    /// Default: false
    #[serde(default)]
    pub show_target: bool,
}

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub contributions: ContributionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { prefix: default_database_prefix() }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_header_bytes: default_max_header_bytes(),
            read_timeout_ms: default_read_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), show_target: false }
    }
}

fn default_database_prefix() -> String {
    "db/".to_string()
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8088))
}

fn default_max_header_bytes() -> usize {
    16 * 1024
}

fn default_read_timeout() -> u64 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}
