mod loader;
mod types;

pub use loader::{load_from_path, parse_config};
pub use types::{
    Config, ContributionConfig, DatabaseConfig, LoggingConfig, ReportConfig, ServerConfig,
};
