//! Serve command - runs the public and internal listeners

use std::future::IntoFuture;

use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

use crate::api::{create_internal_router, create_public_router};
use crate::infrastructure::observability::init_metrics;

/// Run both listeners until Ctrl+C or SIGTERM
pub async fn run(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let state = crate::create_app_state(&config)?;
    let metrics = init_metrics(&config.metrics);

    let external_app = create_public_router(state.clone());
    let internal_app = create_internal_router(state, metrics);

    let external_addr = config.external_listen_addr()?;
    let internal_addr = config.internal_listen_addr()?;

    let external_listener = TcpListener::bind(external_addr).await?;
    let internal_listener = TcpListener::bind(internal_addr).await?;

    info!("Starting external listener on {}", external_addr);
    info!("Starting internal listener on {}", internal_addr);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let external = axum::serve(external_listener, external_app)
        .with_graceful_shutdown(wait_for_shutdown(shutdown_rx.clone()))
        .into_future();
    let internal = axum::serve(internal_listener, internal_app)
        .with_graceful_shutdown(wait_for_shutdown(shutdown_rx))
        .into_future();

    tokio::try_join!(external, internal)?;

    info!("Auth store shutdown complete");

    Ok(())
}

async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}

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
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
