//! Authorization code server binary.
//!
//! Loads configuration from the environment, registers bootstrap clients and serves the
//! consent flow until interrupted.

use anyhow::Result;
use authcode::{
    config::Config,
    http::{AppState, build_router},
    oauth::types::ClientParams,
    storage::{inmemory::MemoryOAuthStorage, traits::OAuthStorage},
    templates::build_engine,
};
use std::{env, sync::Arc};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "authcode=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();

    let version = authcode::config::version()?;

    env::args().for_each(|arg| {
        if arg == "--version" {
            println!("{version}");
            std::process::exit(0);
        }
    });

    tracing::info!(?version, "Starting authorization server");

    let config = Arc::new(Config::new()?);

    let template_env = build_engine(
        &config.http_templates_path,
        &config.external_base,
        &config.version,
    )?;

    let oauth_storage: Arc<dyn OAuthStorage> = Arc::new(MemoryOAuthStorage::new());
    let app_context = AppState::new(config.clone(), template_env, oauth_storage);

    for redirect_uris in config.bootstrap_clients.as_ref() {
        let client = app_context
            .client_registration_service
            .register_client(ClientParams::with_redirect_uris(redirect_uris.clone()))
            .await?;
        tracing::info!(
            client_id = %client.client_id,
            client_secret = %client.client_secret,
            redirect_uris = ?client.redirect_uris,
            "bootstrap client registered"
        );
    }

    // Build the router
    let app = build_router(app_context);

    // Setup graceful shutdown
    let tracker = TaskTracker::new();
    let token = CancellationToken::new();

    {
        let tracker = tracker.clone();
        let inner_token = token.clone();

        let ctrl_c = async {
            if let Err(err) = signal::ctrl_c().await {
                tracing::error!("failed to install Ctrl+C handler: {}", err);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(err) => {
                    tracing::error!("failed to install signal handler: {}", err);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::spawn(async move {
            tokio::select! {
                () = inner_token.cancelled() => { },
                _ = terminate => {},
                _ = ctrl_c => {},
            }

            tracker.close();
            inner_token.cancel();
        });
    }

    // Start HTTP server
    {
        let http_port = *config.http_port.as_ref();
        let bind_address = format!("0.0.0.0:{http_port}");
        let listener = TcpListener::bind(&bind_address).await?;
        tracing::info!("Starting server on {bind_address}");

        let inner_token = token.clone();
        tracker.spawn(async move {
            let shutdown_token = inner_token.clone();
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    tokio::select! {
                        () = shutdown_token.cancelled() => { }
                    }
                    tracing::info!("axum graceful shutdown complete");
                })
                .await;
            if let Err(err) = result {
                tracing::error!("axum task failed: {}", err);
            }

            inner_token.cancel();
        });
    }

    tracker.wait().await;

    Ok(())
}
