//! ImmoKPA Web Server Binary
//!
//! This binary starts the ImmoKPA web server that provides a REST API
//! over the valuation engine and the property store.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001, store in the config directory)
//! immokpa-web
//!
//! # Specify port and data directory
//! immokpa-web --port 8080 --data-dir ~/valuations
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use immokpa::config::Config;
use immokpa::web;

/// ImmoKPA Web Server - REST API for purchase price allocation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory holding properties.json.
    /// Defaults to the configured data directory, or the config directory:
    /// - Linux: ~/.config/immokpa/
    /// - macOS: ~/Library/Application Support/immokpa/
    /// - Windows: %APPDATA%\immokpa\
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().context("Failed to load configuration")?;

    let data_dir = match args.data_dir {
        Some(path) => path,
        None => config.data_dir()?,
    };
    std::fs::create_dir_all(&data_dir).context(format!(
        "Failed to create data directory: {}",
        data_dir.display()
    ))?;

    info!("Data directory: {}", data_dir.display());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    web::run_server(config, data_dir, addr).await
}
