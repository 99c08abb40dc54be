use huginn_recon_lib::config::load_from_path;
use huginn_recon_lib::{ReconError, ReportMode};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_loads_valid_file() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        r#"
[database]
prefix = "/var/lib/huginn-recon/"

[report]
default_mode = "besthitlist"

[server]
listen = "0.0.0.0:9090"
max_header_bytes = 8192
read_timeout_ms = 2500

[contributions]
enabled = true

[logging]
level = "debug"
show_target = true
"#
    )?;

    let config = load_from_path(file.path())?;
    assert_eq!(config.database.prefix, "/var/lib/huginn-recon/");
    assert_eq!(config.report.default_mode, ReportMode::BestHitList);
    assert_eq!(config.server.listen.to_string(), "0.0.0.0:9090");
    assert_eq!(config.server.max_header_bytes, 8192);
    assert_eq!(config.server.read_timeout_ms, 2500);
    assert!(config.contributions.enabled);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.show_target);
    Ok(())
}

#[test]
fn test_config_partial_sections() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "[server]\nlisten = \"127.0.0.1:0\"\n")?;

    let config = load_from_path(file.path())?;
    assert_eq!(config.server.listen.to_string(), "127.0.0.1:0");
    assert_eq!(config.server.read_timeout_ms, 5000);
    assert_eq!(config.database.prefix, "db/");
    Ok(())
}

#[test]
fn test_config_missing_file() {
    let result = load_from_path("/nonexistent/huginn-recon.toml");
    assert!(matches!(result, Err(ReconError::Config(_))));
}

#[test]
fn test_config_rejects_bad_listen_address() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "[server]\nlisten = \"not-an-address\"\n")?;
    assert!(matches!(load_from_path(file.path()), Err(ReconError::Config(_))));
    Ok(())
}
