//! # Stitchbook API Server
//!
//! ## Startup
//! ```text
//! .env (dotenvy) ─► ApiConfig::load ─► tracing ─► Database::new (migrations)
//!        ─► build_app_router ─► serve until Ctrl-C / SIGTERM ─► close pool
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use invoice_api::config::ApiConfig;
use invoice_api::router::build_app_router;
use invoice_api::state::AppState;
use invoice_api::telemetry::init_tracing;
use invoice_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal outside development.
    let _ = dotenvy::dotenv();

    let config = ApiConfig::load().context("Failed to load configuration")?;

    init_tracing(config.is_dev());

    info!(
        env = %config.env,
        db_path = %config.db_path,
        "Starting Stitchbook API"
    );

    let db = Database::new(DbConfig::new(&config.db_path))
        .await
        .context("Failed to open database")?;

    let addr = config.bind_addr();
    let state = AppState::new(db.clone(), config);
    let app = build_app_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped accepting connections, cleaning up");
    db.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
///
/// If a handler can't be installed that signal is ignored and the other
/// still triggers shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
