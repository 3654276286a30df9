//! Report Vault server
//!
//! ## Usage
//!
//! ```bash
//! # Start with defaults (port 3001, database under the local data dir)
//! report-vault
//!
//! # Start with custom config
//! report-vault --config /path/to/config.toml
//!
//! # Start with custom port (PORT env works too)
//! report-vault --port 8080
//!
//! # Start with custom storage directory
//! report-vault --storage-dir /data/reports
//! ```
//!
//! ## HTTP API
//!
//! - `POST /api/reports` - Create a report
//! - `GET /api/reports/{id}` - Fetch a report
//! - `GET /api/reports` - List reports (administrative)
//! - `GET /health` - Health check

use clap::Parser;
use report_vault::{Config, HttpServer, ReportDb, ReportService};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "report-vault")]
#[command(about = "Create-and-share service for security assessment reports")]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP listen port
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Storage directory for the report database
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Directory served for non-API paths
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("report_vault=info".parse()?),
        )
        .init();

    let args = Args::parse();

    // Load config
    let mut config = if let Some(config_path) = &args.config {
        Config::load(config_path)?
    } else {
        Config::default()
    };

    // Apply CLI overrides
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(dir) = args.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(dir) = args.static_dir {
        config.static_dir = dir;
    }

    info!(
        storage_dir = %config.storage_dir.display(),
        port = config.port,
        "Starting report-vault"
    );

    // Ensure storage directory exists
    tokio::fs::create_dir_all(&config.storage_dir).await?;

    // Save default config if it doesn't exist
    let config_path = config.config_path();
    if !config_path.exists() {
        config.save(&config_path)?;
        info!(path = %config_path.display(), "Created default config");
    }

    // The store must open before a single connection is accepted
    let db = Arc::new(ReportDb::open(&config.db_path())?);
    let service = Arc::new(ReportService::new(db.clone()));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let server = Arc::new(HttpServer::bind(addr, service, config.static_dir.clone()).await?);

    info!("HTTP API available at http://{}", server.local_addr());
    info!("Endpoints:");
    info!("  GET  /health            - Health check");
    info!("  POST /api/reports       - Create a report");
    info!("  GET  /api/reports/{{id}}  - Fetch a report");
    info!("  GET  /api/reports       - List reports (admin)");

    info!("Press Ctrl+C to stop.");

    // Handle shutdown signal
    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutting down...");
    };

    // Run HTTP server with graceful shutdown
    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
            }
        }
        _ = shutdown => {}
    }

    // Print stats before exit
    if let Ok(stats) = db.stats() {
        info!(reports = stats.report_count, "Final storage stats");
    }

    Ok(())
}
