//! Form Analyzer (fitrep-fa) - Main entry point
//!
//! Serves the frame analysis pipeline over HTTP. Landmarks are produced by an
//! external pose model; this service only counts and coaches.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fitrep_common::config::{resolve_config_path, ConfigOrigin, TomlConfig};
use fitrep_fa::config::{CliOverrides, ServiceConfig, MODULE_NAME};
use fitrep_fa::{build_router, AppState, FrameAnalysisPipeline, SessionStore};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for fitrep-fa
#[derive(Parser, Debug)]
#[command(name = "fitrep-fa")]
#[command(about = "Exercise form analyzer for FitRep")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "FITREP_FA_PORT")]
    port: Option<u16>,

    /// Interface to bind
    #[arg(short, long, env = "FITREP_FA_BIND")]
    bind: Option<String>,

    /// Bootstrap TOML file (falls back to FITREP_CONFIG, then the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so the configured level applies;
    // the outcome is logged once the subscriber is installed
    let config_path = resolve_config_path(args.config.as_deref(), MODULE_NAME);
    let (toml_config, origin) = TomlConfig::load_or_default(&config_path)
        .context("Failed to load configuration")?;

    let config = ServiceConfig::resolve(
        toml_config,
        CliOverrides {
            bind_address: args.bind,
            port: args.port,
        },
    )
    .context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("fitrep_fa={0},tower_http={0}", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting FitRep Form Analyzer (fitrep-fa) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match origin {
        ConfigOrigin::File(path) => info!("Configuration: {}", path.display()),
        ConfigOrigin::Defaults(path) => {
            warn!("Config file not found at {}, using defaults", path.display())
        }
    }

    let store = SessionStore::new(&config.sessions).context("Failed to create session store")?;
    info!(
        "Session store: idle timeout {}s, cleanup watermark {}",
        config.sessions.idle_timeout_secs, config.sessions.cleanup_watermark
    );

    let pipeline = FrameAnalysisPipeline::new(Arc::new(store));
    let app = build_router(AppState::new(pipeline))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("{} listening on http://{}", MODULE_NAME, addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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
