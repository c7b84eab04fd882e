//! # Notes API Server
//!
//! Multi-user notes service: users sign up, log in and manage their own notes.
//!
//! ## Usage
//!
//! ```bash
//! NOTES_STORAGE=memory JWT_SECRET=$(openssl rand -hex 32) cargo run -p notes-api
//! ```

use notes_api::{
    app::{build_router, AppState},
    config::{Config, LogFormat, StorageBackend},
};
use notes_shared::db::{
    migrations::run_migrations,
    pool::{close_pool, create_pool, DatabaseConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "notes_api=debug,notes_shared=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
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

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    tracing::info!(
        storage = config.storage.as_str(),
        "Notes API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let bind_address = config.bind_address();

    let (state, pool) = match config.storage {
        StorageBackend::Postgres => {
            let pool = create_pool(DatabaseConfig {
                url: config.database.url.clone(),
                max_connections: config.database.max_connections,
                ..Default::default()
            })
            .await?;
            run_migrations(&pool).await?;
            (AppState::with_pg_store(pool.clone(), config), Some(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            (AppState::with_memory_store(config), None)
        }
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        close_pool(pool).await;
    }

    tracing::info!("Server stopped");
    Ok(())
}
