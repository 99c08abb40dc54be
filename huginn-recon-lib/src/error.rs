use thiserror::Error;

/// Errors raised by the collaborators around the fingerprinting core
///
/// The core itself (matching, tallying, reporting) never fails: missing
/// tables and unwritable stores degrade to "no contribution".
#[derive(Error, Debug)]
pub enum ReconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Header parse error: {0}")]
    HeaderParse(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, ReconError>;
