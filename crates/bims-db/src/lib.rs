//! # BIMS DB
//!
//! Database pool and [`UserStore`](bims_auth::UserStore) implementations.
//!
//! - [`postgres`]: [`PgUserStore`], backed by the `users` table
//! - [`memory`]: [`MemoryUserStore`], a process-local store for tests and local runs
//!
//! # Example
//!
//! ```ignore
//! use bims_db::{PgUserStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url, 10).await?;
//! run_migrations(&pool).await?;
//! let users = PgUserStore::new(pool);
//! ```

pub mod memory;
pub mod postgres;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;
// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens a PostgreSQL connection pool.
///
/// Connection acquisition times out after five seconds, which bounds every
/// store lookup.
pub async fn init_db_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    tracing::info!(max_connections, "Database pool initialised");
    Ok(pool)
}

/// Applies the migrations under `migrations/` at the workspace root.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
