//! Persistence layer for the BancaDati tender service.
//!
//! Provides the [`store::TenderStore`] abstraction with an in-memory and a
//! PostgreSQL implementation, plus pool bootstrap and migrations.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use crate::error::StoreError;

pub mod error;
pub mod mapper;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repositories;
pub mod seed;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
///
/// Callers beyond `max_connections` queue for up to `acquire_timeout`
/// before the acquire fails.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

/// Run a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), StoreError> {
    sqlx::migrate!("../../db/migrations").run(pool).await?;
    Ok(())
}
