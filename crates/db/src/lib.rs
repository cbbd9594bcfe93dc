//! Persistence for the project showcase.
//!
//! Everything is stored as JSON text under string keys in a
//! [`store::KeyValueStore`]. Repositories in [`repositories`] own the
//! (de)serialization of each key.

use sqlx::postgres::PgPoolOptions;

pub mod keys;
pub mod repositories;
pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, PgStore, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply embedded migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
