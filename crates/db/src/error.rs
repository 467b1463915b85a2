/// Failures surfaced by a tender store.
///
/// Callers treat every variant as "store unreachable"; the cause is logged,
/// never returned to API clients.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
