#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use huginn_recon_lib::config::{load_from_path, Config};
use huginn_recon_lib::recon::{identify, record_sample};
use huginn_recon_lib::report::{ReportMode, Reporter, Surface};
use huginn_recon_lib::server::{self, ConnectionCount};
use huginn_recon_lib::telemetry::init_tracing;
use huginn_recon_lib::{detect_proxy, FileStore, RawHeaders, ReconError, RequestSignals};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Huginn recon (HTTP header fingerprinting of web clients)")]
struct Cli {
    /// Path to configuration TOML file
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "HUGINN_RECON_CONFIG",
        global = true
    )]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Identify the client that sent a request head
    Identify {
        /// File holding the request head, `-` for stdin
        #[arg(long, value_name = "FILE")]
        headers: PathBuf,

        /// Report shape: besthit, besthitdetail, list, besthitlist
        #[arg(short, long)]
        mode: Option<String>,

        /// Reference table prefix (overrides the configuration)
        #[arg(short, long, value_name = "PREFIX")]
        database: Option<String>,
    },

    /// Store a request head as a sample of an implementation
    Record {
        /// File holding the request head, `-` for stdin
        #[arg(long, value_name = "FILE")]
        headers: PathBuf,

        /// Implementation label to store the sample under
        #[arg(short, long)]
        implementation: String,

        /// Reference table prefix (overrides the configuration)
        #[arg(short, long, value_name = "PREFIX")]
        database: Option<String>,
    },

    /// Report whether a request head went through a proxy
    Proxy {
        /// File holding the request head, `-` for stdin
        #[arg(long, value_name = "FILE")]
        headers: PathBuf,
    },

    /// Fingerprint live HTTP requests
    Serve,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_from_path(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("failed to load configuration: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    if let Err(err) = init_tracing(&config.logging.level, config.logging.show_target) {
        eprintln!("failed to initialize tracing: {err}");
        return ExitCode::FAILURE;
    }

    match execute(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Command, config: Config) -> Result<(), ReconError> {
    match command {
        Command::Identify { headers, mode, database } => {
            let raw = read_headers(&headers)?;
            let store = FileStore::new(database.unwrap_or(config.database.prefix));
            let mode = mode.map_or(config.report.default_mode, |m| ReportMode::parse(&m));
            let identification = identify(&store, &RequestSignals::from_headers(&raw));
            println!("{}", identification.render(&Reporter::new(Surface::Text), mode));
        }
        Command::Record { headers, implementation, database } => {
            let raw = read_headers(&headers)?;
            let store = FileStore::new(database.unwrap_or(config.database.prefix));
            let written =
                record_sample(&store, &RequestSignals::from_headers(&raw), &implementation);
            if written == 0 {
                warn!(label = %implementation, "no new records written");
            }
            println!("{written}");
        }
        Command::Proxy { headers } => {
            let raw = read_headers(&headers)?;
            println!("{}", detect_proxy(&raw));
        }
        Command::Serve => {
            let cfg = Arc::new(config);
            info!(listen = %cfg.server.listen, database = %cfg.database.prefix, "configuration loaded");

            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    let _ = shutdown_tx.send(true);
                }
            });

            server::run(cfg, Arc::new(ConnectionCount::default()), shutdown_rx).await?;
        }
    }
    Ok(())
}

fn read_headers(path: &Path) -> Result<RawHeaders, ReconError> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    RawHeaders::parse(&text)
}
