//! LHM Portal - captive portal authorization bridge for SonicWall hotspots
//!
//! The SonicWall redirects unauthorized guests here. The portal shows a
//! consent page, authorizes the session with the appliance's LHM callback,
//! and sends the guest on to the page they originally asked for.

mod config;
mod controller;
mod error;
mod error_codes;
mod handler;
mod http;
mod models;
mod parser;
mod web;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use controller::SonicWallController;
use handler::Authorizer;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lhm-portal")]
#[command(about = "Captive portal authorization bridge for SonicWall LHM", long_about = None)]
struct Args {
    /// Config file path (default: first of config.toml, /etc/lhm-portal/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides server.listen
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut cfg = config::Config::load(args.config.as_deref())?;
    if let Some(listen) = args.listen {
        cfg.server.listen = listen;
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.level)),
        )
        .init();

    tracing::info!("LHM Portal v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Session timeout: {}s, idle timeout: {}s",
        cfg.sonicwall.session_timeout,
        cfg.sonicwall.idle_timeout
    );

    let client = http::HttpClient::new(&cfg.http, &cfg.sonicwall)?;
    let authorizer = Authorizer::new(
        Arc::new(SonicWallController::new(client)),
        cfg.sonicwall.session_settings(),
    );
    let app = web::router(&cfg.server, authorizer);

    let listener = tokio::net::TcpListener::bind(&cfg.server.listen)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.server.listen))?;
    tracing::info!(
        "Serving authorization page at http://{}{}",
        listener.local_addr()?,
        cfg.server.path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shut down");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
