use std::sync::Arc;

use scratchpad::{
    app,
    auth::Credentials,
    config,
    repository::Repository,
    service::NoteService,
    store::{KvStore, MemoryStore, PostgresStore},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {e}");
        panic!("failed to load configuration: {e}");
    });
    tracing::info!("Successfully loaded config: {:?}", cfg);

    let credentials = Credentials::new(cfg.user.clone(), cfg.password.clone());
    if !credentials.is_complete() {
        tracing::warn!("NOTES_USER or NOTES_PASSWORD is not set, every request will be rejected");
    }

    // Store creation
    let store: Arc<dyn KvStore> = match cfg.pg_dsn.as_deref() {
        Some(dsn) => Arc::new(PostgresStore::connect(dsn).await.unwrap_or_else(|e| {
            tracing::error!("Failed to open database: {e}");
            panic!("failed to open database: {e}");
        })),
        None => {
            tracing::warn!("NOTES_PG_DSN is not set, notes are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    // Service creation
    let service = Arc::new(NoteService::new(Repository::new(store.clone())));

    let router = app(service, Arc::new(credentials));

    let listener = tokio::net::TcpListener::bind(cfg.listen_addr())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind {}: {e}", cfg.listen_addr());
            panic!("failed to bind {}: {e}", cfg.listen_addr());
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Notes server starting, listening on {}", addr),
        Err(e) => tracing::warn!("Notes server starting, local address unknown: {e}"),
    }

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("HTTP server error: {e}");
    }

    if let Err(e) = store.close().await {
        tracing::error!("Failed to close store: {e}");
    }

    tracing::info!("Notes server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
