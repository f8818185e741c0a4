//! Polls server entry point.

use std::net::SocketAddr;
use std::time::Duration;

use axum_server::Handle;
use polls::{create_routes, db, AppError, AppState, Config};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for SIGINT, or SIGTERM on Unix, then asks the server to drain.
async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }

    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "polls=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Create the database connection pool
    let pool = db::create_pool(&config.database).await?;
    info!(url = %config.database.url, "Connected to database");

    let routes = create_routes(AppState::new(pool));

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .map_err(|e| AppError::Config(format!("invalid bind address: {e}")))?;

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    info!(%addr, "Listening");
    axum_server::bind(addr)
        .handle(handle)
        .serve(routes.into_make_service())
        .await?;

    Ok(())
}
