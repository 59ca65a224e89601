use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use server::{
    build_router,
    config::{ServerConfig, StoreKind},
    services::{PasswordHasher, SystemClock},
    state::{AppState, SharedState},
    store::{MemoryStore, MySqlStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from_env().context("reading configuration")?;
    let state = open_state(&config).await?;
    let app = build_router(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, store = ?config.store, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

async fn open_state(config: &ServerConfig) -> anyhow::Result<SharedState> {
    let clock = Arc::new(SystemClock);
    let hasher = PasswordHasher::default();
    match config.store {
        StoreKind::MySql => {
            let store = MySqlStore::connect(&config.database_url, config.max_connections)
                .await
                .context("connecting to MySQL")?;
            store.bootstrap().await.context("creating tables")?;
            store.ping().await.context("pinging MySQL")?;
            let store = Arc::new(store);
            Ok(AppState::with_stores(store.clone(), store, hasher, clock))
        }
        StoreKind::Memory => {
            warn!("using in-memory store; accounts and scores are lost on exit");
            let store = Arc::new(MemoryStore::new());
            Ok(AppState::with_stores(store.clone(), store, hasher, clock))
        }
    }
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                warn!(error = %err, "could not install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
