//! Family Bookshelf server.
//!
//! Entry point that opens the store, loads plugins, and starts the
//! HTTP server.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Request, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use bookshelf_api::{build_router, AppState};
use bookshelf_core::config::AppConfig;
use bookshelf_core::{AppError, AppResult};
use bookshelf_lookup::LookupClient;
use bookshelf_plugin::{BookshelfPlugin, LoadOutcome, PluginLoader, StoreCapabilities};
use bookshelf_store::repositories::{
    ActivityRepository, BookRepository, RatingRepository, SettingsRepository,
};
use bookshelf_store::{schema, Store};
use plugin_dnf_tracker::DnfTrackerPlugin;
use plugin_spice_o_meter::SpiceOMeterPlugin;

#[tokio::main]
async fn main() {
    let env = std::env::var("BOOKSHELF_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(err) = run(config).await {
        tracing::error!("Server error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting Family Bookshelf v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(Store::open(&config.store.path)?);
    schema::initialize(&store)?;
    tracing::info!(path = %store.path().display(), "Store ready");

    let capabilities = Arc::new(StoreCapabilities::new(Arc::clone(&store)));

    let mut outcome = if config.plugins.auto_load {
        let loader = PluginLoader::new()
            .register(Arc::new(DnfTrackerPlugin::new()) as Arc<dyn BookshelfPlugin>)
            .register(Arc::new(SpiceOMeterPlugin::new()) as Arc<dyn BookshelfPlugin>);
        loader.load_all(
            std::path::Path::new(&config.plugins.directory),
            capabilities.clone(),
        )
    } else {
        tracing::info!("Plugin auto-load disabled");
        LoadOutcome::default()
    };
    let plugin_api = outcome.take_api_router();
    let plugin_assets = outcome.take_asset_router();

    let lookup = Arc::new(LookupClient::new(&config.lookup)?);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState {
        config: Arc::new(config),
        store: Arc::clone(&store),
        capabilities: capabilities.clone(),
        books: BookRepository::new(Arc::clone(&store)),
        ratings: RatingRepository::new(Arc::clone(&store)),
        settings: SettingsRepository::new(Arc::clone(&store)),
        activity: ActivityRepository::new(Arc::clone(&store)),
        lookup,
        plugins: Arc::new(outcome.registry),
        ui_hooks: Arc::new(outcome.ui_hooks),
    };

    let app = build_router(state, plugin_api, plugin_assets);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("Family Bookshelf listening on http://{addr}");

    let (drain_tx, drain_rx) = tokio::sync::oneshot::channel();
    let serve = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!(
                grace_seconds = grace.as_secs(),
                "Shutdown signal received, starting graceful shutdown"
            );
            let _ = drain_tx.send(());
        })
        .into_future();
    tokio::pin!(serve);

    // The grace clock starts when the shutdown signal fires, not at boot.
    let grace_elapsed = async move {
        let _ = drain_rx.await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = &mut serve => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = grace_elapsed => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "Grace period elapsed; dropping remaining connections"
            );
        }
    }

    // One last flush so nothing queued in memory is lost.
    store.persist()?;
    tracing::info!("Family Bookshelf shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!("Failed to install SIGTERM handler: {err}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
