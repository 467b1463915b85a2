use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bancadati_core::mock::{generate_mock_tenders, generate_seeded};
use bancadati_db::memory::MemoryTenderStore;
use bancadati_db::postgres::PgTenderStore;
use bancadati_db::repositories::TenderRepo;
use bancadati_db::store::TenderStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bancadati_api::config::{LogFormat, ServerConfig, StoreKind};
use bancadati_api::router::build_app_router;
use bancadati_api::state::AppState;

const DEFAULT_LOG_FILTER: &str = "bancadati_api=debug,bancadati_db=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(
        host = %config.host,
        port = config.port,
        store = ?config.store,
        "Loaded server configuration"
    );

    // --- Tender store ---
    let store = build_store(&config).await?;
    tracing::info!(backend = store.backend(), "Tender store ready");

    // --- App state ---
    let state = AppState { store };

    // --- Router ---
    let app = build_app_router(state, &config)?;

    // --- Start server ---
    let addr = SocketAddr::new(config.host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Construct the configured tender store.
///
/// For PostgreSQL this connects, runs migrations and, when
/// `SEED_DATABASE` is set, fills an empty database with mock tenders.
async fn build_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn TenderStore>> {
    match config.store {
        StoreKind::Memory => {
            let store = MemoryTenderStore::from_mock(config.mock_tender_count, config.mock_seed);
            tracing::info!(tenders = store.len(), seed = ?config.mock_seed, "Generated mock tenders");
            Ok(Arc::new(store))
        }
        StoreKind::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;

            let pool = bancadati_db::create_pool(
                database_url,
                config.db_max_connections,
                Duration::from_secs(config.db_acquire_timeout_secs),
            )
            .await
            .context("Failed to connect to database")?;
            tracing::info!("Database connection pool created");

            bancadati_db::health_check(&pool)
                .await
                .context("Database health check failed")?;

            bancadati_db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            if config.seed_database {
                let existing = TenderRepo::count_all(&pool).await?;
                if existing == 0 {
                    let tenders = match config.mock_seed {
                        Some(seed) => generate_seeded(seed, config.mock_tender_count),
                        None => generate_mock_tenders(config.mock_tender_count),
                    };
                    bancadati_db::seed::seed_tenders(&pool, &tenders)
                        .await
                        .context("Failed to seed database")?;
                } else {
                    tracing::info!(existing, "Database already holds tenders, skipping seed");
                }
            }

            Ok(Arc::new(PgTenderStore::new(pool)))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
