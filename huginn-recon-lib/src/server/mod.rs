#![forbid(unsafe_code)]

//! Recon service: fingerprints each incoming HTTP/1.x request from its raw
//! head, so header order and name case survive exactly as the client sent
//! them.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

use crate::config::Config;
use crate::error::Result;

mod handler;
pub mod metrics;
pub mod request;

pub use handler::{respond, ReconHandler, IMPLEMENTATION_PARAM, MODE_PARAM};
pub use metrics::{ConnectionCount, ConnectionSnapshot};
pub use request::{read_request_head, HeadOutcome, RequestHead};

/// Bind the configured address and serve until `shutdown` flips
pub async fn run(
    config: Arc<Config>,
    counters: Arc<ConnectionCount>,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let listener = TcpListener::bind(config.server.listen).await?;
    info!(addr = ?config.server.listen, "recon listener bound");
    serve(listener, config, counters, shutdown).await
}

/// Serve on an already bound listener
pub async fn serve(
    listener: TcpListener,
    config: Arc<Config>,
    counters: Arc<ConnectionCount>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let handler = ReconHandler::new(config, counters);
    handler.run(listener, &mut shutdown).await
}
