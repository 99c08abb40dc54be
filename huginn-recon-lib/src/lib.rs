#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod matching;
pub mod proxy_detect;
pub mod recon;
pub mod report;
pub mod server;
pub mod signals;
pub mod store;
pub mod telemetry;

pub use config::{load_from_path, Config};
pub use error::{ReconError, Result};
pub use matching::MatchTally;
pub use proxy_detect::{detect_proxy, ProxyVerdict};
pub use recon::{fingerprint, fingerprint_with_prefix, possibility_count, record_sample};
pub use report::ReportMode;
pub use signals::{RawHeaders, RequestSignals, SignalKind};
pub use store::{FileStore, MemoryStore, ReferenceStore};
