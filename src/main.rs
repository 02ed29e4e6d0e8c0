//! security.txt gateway.
//!
//! Serves `/.well-known/security.txt` and `/security.txt` from configuration
//! and forwards every other request to an optional upstream.
//!
//! ```text
//!     Client ──▶ request id ──▶ trace ──▶ timeout ──▶ security.txt ──▶ upstream
//!                                                          │
//!                                                          └─▶ text/plain document
//! ```

use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use security_txt_gateway::config::{load_config, GatewayConfig};
use security_txt_gateway::observability::{logging, metrics};
use security_txt_gateway::{generate, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "security-txt-gateway")]
#[command(about = "Serve an RFC 9116 security.txt in front of an HTTP upstream", long_about = None)]
struct Cli {
    /// Configuration file (TOML, or JSON with a .json extension).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the rendered security.txt and exit.
    #[arg(long)]
    print: bool,
}

/// Write the rendered security.txt for `config` to `out`.
fn write_document(config: &GatewayConfig, out: &mut impl Write) -> std::io::Result<()> {
    out.write_all(&generate(&config.security_txt))?;
    out.flush()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    if cli.print {
        write_document(&config, &mut std::io::stdout())?;
        return Ok(());
    }

    logging::init_logging(&config.observability);

    tracing::info!("security-txt-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        upstream = ?config.upstream.as_ref().map(|u| u.url.as_str()),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.security_txt.contact.iter().all(|c| c.is_empty()) {
        tracing::warn!("No Contact configured; RFC 9116 requires at least one");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown.trigger_on_signal());

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
