use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{ReconError, Result};

pub fn load_from_path<P: AsRef<Path>>(p: P) -> Result<Config> {
    let txt = fs::read_to_string(p)
        .map_err(|e| ReconError::Config(format!("Failed to read config file: {e}")))?;
    parse_config(&txt)
}

pub fn parse_config(txt: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(txt)
        .map_err(|e| ReconError::Config(format!("Failed to parse config: {e}")))?;

    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> Result<()> {
    if cfg.database.prefix.contains('\0') {
        return Err(ReconError::Config("database prefix contains a NUL byte".to_string()));
    }
    if cfg.server.max_header_bytes == 0 {
        return Err(ReconError::Config("max_header_bytes must be > 0".to_string()));
    }
    if cfg.server.read_timeout_ms == 0 {
        return Err(ReconError::Config("read_timeout_ms must be > 0".to_string()));
    }
    if !matches!(cfg.logging.level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
        return Err(ReconError::Config(format!(
            "unknown log level: {}",
            cfg.logging.level
        )));
    }
    Ok(())
}
