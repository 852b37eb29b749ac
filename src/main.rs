//! Translating Reverse Proxy
//!
//! Serves one upstream site under `/proxy`, translating HTML text on the fly.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────────┐
//!                 │                   TRANSLATING PROXY                      │
//!                 │                                                          │
//!  Client ───────▶│  http::server ──▶ http::proxy ──▶ language::selector     │
//!                 │                        │                                 │
//!                 │                        ▼                                 │
//!                 │                 upstream fetch ◀─────────────────────────┼──── Upstream
//!                 │                        │                                 │      site
//!                 │          text/html? ───┴─── no ──▶ pass-through          │
//!                 │              │                                           │
//!                 │              ▼                                           │
//!                 │      rewrite::scanner ──▶ rewrite::pipeline              │
//!                 │                                │                         │
//!                 │                                ▼                         │
//!                 │                     translation::node ──▶ client ────────┼──── Translation
//!  Client ◀───────│◀──────── streamed body ────────┘                         │      service
//!                 │                                                          │
//!                 │   config · observability · resilience · lifecycle        │
//!                 └──────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use translating_proxy::config::{load_config, AppConfig};
use translating_proxy::lifecycle::signals::spawn_signal_listener;
use translating_proxy::observability::{logging, metrics};
use translating_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "translating-proxy")]
#[command(about = "Reverse proxy that translates HTML pages on the fly", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("translating-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.proxy.upstream_url,
        translation_endpoint = %config.translation.endpoint,
        concurrency = config.translation.concurrency,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
