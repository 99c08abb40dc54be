#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http::{header, Method, Response, StatusCode};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ReconError, Result};
use crate::proxy_detect::detect_proxy;
use crate::recon::{identify, record_sample};
use crate::report::{escape_html, ReportMode, Reporter, Surface};
use crate::server::metrics::ConnectionCount;
use crate::server::request::{read_request_head, HeadOutcome, RequestHead};
use crate::signals::RequestSignals;
use crate::store::FileStore;

/// Query parameter selecting a single report shape
pub const MODE_PARAM: &str = "mode";
/// Query parameter naming the implementation to record the request under
pub const IMPLEMENTATION_PARAM: &str = "implementation";

pub struct ReconHandler {
    config: Arc<Config>,
    store: Arc<FileStore>,
    connections: Arc<ConnectionCount>,
}

impl ReconHandler {
    pub fn new(config: Arc<Config>, connections: Arc<ConnectionCount>) -> Self {
        let store = Arc::new(FileStore::new(config.database.prefix.clone()));
        Self { config, store, connections }
    }

    pub async fn run(
        &self,
        listener: TcpListener,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<()> {
        let mut watching = true;
        loop {
            let accept_fut = listener.accept();
            let result = tokio::select! {
                res = accept_fut => res,
                res = shutdown.changed(), if watching => {
                    if res.is_ok() {
                        info!("shutdown signal received, stopping accept loop");
                        break;
                    } else {
                        // sender dropped; no shutdown will ever come
                        watching = false;
                        continue;
                    }
                }
            };
            let (client, addr) = match result {
                Ok(pair) => pair,
                Err(e) => {
                    let snapshot = self.connections.snapshot();
                    warn!(error = %e, current = snapshot.current, total = snapshot.total, errors = snapshot.errors, "failed to accept connection");
                    continue;
                }
            };
            self.connections.increment();
            let snapshot = self.connections.snapshot();
            info!(%addr, current = snapshot.current, total = snapshot.total, errors = snapshot.errors, "accepted connection");

            let cfg = self.config.clone();
            let store = self.store.clone();
            let counts = self.connections.clone();
            tokio::spawn(async move {
                if let Err(e) = handle_conn(cfg, store, client, addr).await {
                    counts.increment_errors();
                    warn!(%addr, error = %e, "connection failed");
                }
                counts.decrement();
            });
        }
        Ok(())
    }
}

async fn handle_conn(
    config: Arc<Config>,
    store: Arc<FileStore>,
    mut client: TcpStream,
    addr: SocketAddr,
) -> Result<()> {
    let read_timeout = Duration::from_millis(config.server.read_timeout_ms);
    let outcome = timeout(
        read_timeout,
        read_request_head(&mut client, config.server.max_header_bytes),
    )
    .await
    .map_err(|_| ReconError::Http("timed out reading request head".to_string()))??;

    let (response, head_only) = match outcome {
        HeadOutcome::Closed => return Ok(()),
        HeadOutcome::TooLarge => (
            plain(StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE, "request head too large\n")?,
            false,
        ),
        HeadOutcome::Malformed(reason) => {
            debug!(%addr, %reason, "malformed request");
            (plain(StatusCode::BAD_REQUEST, "malformed request\n")?, false)
        }
        HeadOutcome::Request(head) => {
            let head_only = head.method == Method::HEAD.as_str();
            let response = tokio::task::spawn_blocking(move || respond(&config, &store, &head))
                .await
                .map_err(|e| ReconError::Http(format!("report task failed: {e}")))??;
            (response, head_only)
        }
    };

    info!(%addr, status = response.status().as_u16(), "request answered");
    client.write_all(&encode_response(&response, head_only)).await?;
    client.shutdown().await?;
    Ok(())
}

/// Build the answer to one request
///
/// Runs the fingerprinting core, which reads the reference tables
/// synchronously.
pub fn respond(config: &Config, store: &FileStore, head: &RequestHead) -> Result<Response<String>> {
    if head.method != Method::GET.as_str() && head.method != Method::HEAD.as_str() {
        return Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header(header::ALLOW, "GET, HEAD")
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body("method not allowed\n".to_string())
            .map_err(|e| ReconError::Http(e.to_string()));
    }

    let signals = RequestSignals::from_headers(&head.headers);

    let recorded = match head.query_param(IMPLEMENTATION_PARAM) {
        Some(label) if !label.is_empty() && config.contributions.enabled => {
            record_sample(store, &signals, &label);
            Some(label)
        }
        Some(label) if !label.is_empty() => {
            debug!(label = %label, "contributions disabled, sample not recorded");
            None
        }
        _ => None,
    };

    let identification = identify(store, &signals);

    if let Some(mode) = head.query_param(MODE_PARAM) {
        let mode = ReportMode::parse(&mode);
        debug!(%mode, "single report requested");
        let mut body = identification.render(&Reporter::new(Surface::Text), mode);
        if !body.is_empty() && !body.ends_with('\n') {
            body.push('\n');
        }
        return plain(StatusCode::OK, &body);
    }

    let html = Reporter::new(Surface::Html);
    let mut body = String::from("<html><body>\n");
    if let Some(label) = recorded {
        body.push_str(&format!("implementation: {}<br>\n", escape_html(&label)));
    }
    body.push_str("<h1>Best Hits:</h1>\n");
    body.push_str(&identification.render(&html, ReportMode::BestHitList));
    body.push_str("\n<br>\n<h1>Full hit list</h1>\n");
    body.push_str(&identification.render(&html, ReportMode::List));
    body.push_str("<h1>Proxy</h1>\n");
    body.push_str(&escape_html(&detect_proxy(&head.headers).to_string()));
    body.push_str("\n</body></html>\n");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(body)
        .map_err(|e| ReconError::Http(e.to_string()))
}

fn plain(status: StatusCode, body: &str) -> Result<Response<String>> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(body.to_string())
        .map_err(|e| ReconError::Http(e.to_string()))
}

/// Serialize as an HTTP/1.1 response that closes the connection
fn encode_response(response: &Response<String>, head_only: bool) -> Vec<u8> {
    let status = response.status();
    let mut out = format!(
        "HTTP/1.1 {} {}\r\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    );
    for (name, value) in response.headers() {
        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(&String::from_utf8_lossy(value.as_bytes()));
        out.push_str("\r\n");
    }
    out.push_str(&format!("content-length: {}\r\n", response.body().len()));
    out.push_str("connection: close\r\n\r\n");
    if !head_only {
        out.push_str(response.body());
    }
    out.into_bytes()
}
