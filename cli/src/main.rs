//! Rooms service CLI server
//!
//! Headless REST server suitable for deployment as a systemd service,
//! Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/rooms-service/config.toml)
//! rooms-service
//!
//! # Custom config path
//! rooms-service --config /etc/rooms-service/config.toml
//!
//! # Override the port
//! rooms-service --api-port 8080
//!
//! # Validate config without starting
//! rooms-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use rooms_service::config::AppConfig;
use rooms_service::server::{init_tracing, ServerHandle, ServerOptions};

/// Rooms service: paginated, filterable room listing over REST.
#[derive(Parser, Debug)]
#[command(
    name = "rooms-service",
    version,
    about = "REST server for paginated, filterable room listings",
    long_about = "Rooms service: REST API over a generic pagination, filter and sort engine.\n\n\
                  Default config: ~/.config/rooms-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ROOMS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(rooms_service::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file   : {}", config_path.display());
        println!("   API address   : {}", config.api_address());
        println!("   Query timeout : {}s", config.database.query_timeout_secs);
        println!("   Log level     : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
