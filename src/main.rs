//! Install script router.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │               INSTALL ROUTER                 │
//!                        │                                              │
//!     Client Request     │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!     ───────────────────┼─▶│  tower  │───▶│ handler │───▶│ routing  │  │
//!                        │  │ layers  │    │         │    │  table   │  │
//!                        │  └─────────┘    └─────────┘    └────┬─────┘  │
//!                        │                                     │        │
//!                        │                                     ▼        │
//!     Client Response    │  ┌─────────┐                  ┌──────────┐  │
//!     ◀──────────────────┼──│response │◀─────────────────│ upstream │◀─┼──── Script
//!                        │  │rewrite  │                  │ fetcher  │  │     Origin
//!                        │  └─────────┘                  └──────────┘  │
//!                        │                                              │
//!                        │  config · observability · lifecycle          │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use install_router::config::load_or_default;
use install_router::lifecycle::signals::trigger_on_signal;
use install_router::observability::init_logging;
use install_router::{HttpServer, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "install-router", version, about = "Serve install scripts from a fixed origin")]
struct Cli {
    /// Path to a TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. 127.0.0.1:8080).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "install-router starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        routes = config.routing.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let server = HttpServer::new(config)?;

    // Bind last so traffic only arrives once everything is ready.
    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        trigger_on_signal(&shutdown).await;
    });

    server.run(listener, signal).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
