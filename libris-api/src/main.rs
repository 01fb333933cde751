//! libris-api - book/author catalog service
//!
//! Startup sequence:
//! 1. Parse command line, locate and read the TOML bootstrap file
//! 2. Resolve configuration (CLI > env > TOML > defaults) and start tracing
//! 3. Open or create the SQLite store and bootstrap the schema
//! 4. Build the token service from the configured signing key
//! 5. Serve until Ctrl+C / SIGTERM, then close the pool

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use libris_common::api::{generate_secret, TokenService};
use libris_common::config::{
    read_toml_file, resolve_config_path, CliOverrides, ServiceConfig, TomlConfig,
};
use libris_api::{build_router, AppState};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for libris-api
#[derive(Parser, Debug)]
#[command(name = "libris-api")]
#[command(about = "Book/author catalog HTTP service")]
#[command(version)]
struct Args {
    /// TOML config file (defaults to <config_dir>/libris/config.toml when present)
    #[arg(short, long, env = "LIBRIS_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:8080
    #[arg(short, long)]
    bind: Option<String>,

    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Token signing key
    #[arg(long)]
    jwt_secret: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref())?;
    let toml = match &config_path {
        Some(path) => read_toml_file(path)?,
        None => TomlConfig::default(),
    };

    let cli = CliOverrides {
        bind_addr: args.bind,
        database_path: args.database,
        jwt_secret: args.jwt_secret,
    };
    let config = ServiceConfig::resolve(&cli, &toml)?;

    init_tracing(&config.log_level);

    info!(
        "Starting libris-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config_path {
        Some(path) => {
            info!("Config file: {}", path.display());
            if toml.auth.password.is_some() || toml.auth.jwt_secret.is_some() {
                warn!("Config file holds credentials; keep it readable by the service user only");
            }
        }
        None => info!("No config file found, using environment and defaults"),
    }

    info!("Database path: {}", config.database_path.display());
    let pool = libris_common::db::init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;
    info!("✓ Database ready");

    let secret = match &config.jwt_secret {
        Some(secret) => {
            info!("✓ Loaded token signing key");
            secret.as_bytes().to_vec()
        }
        None => {
            warn!("No token signing key configured; generated a random key for this process");
            warn!("Issued tokens will not survive a restart. Set LIBRIS_JWT_SECRET to persist them");
            generate_secret()
        }
    };
    let tokens = TokenService::new(&secret, config.operator.clone(), config.token_ttl_secs);

    let state = AppState::new(pool.clone(), tokens);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!("libris-api listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Default filter is derived from the configured level; RUST_LOG wins when set
fn init_tracing(level: &str) {
    let default_filter = format!(
        "libris_api={level},libris_common={level},tower_http={level}",
        level = level
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
