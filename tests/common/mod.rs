//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use wardplane::storage::DbPool;

/// Counter for generating unique database names within a test run
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Create an isolated in-memory database with migrations applied.
///
/// Each call gets its own shared-cache memory database so tests in the
/// same binary cannot see each other's state. `min_connections(1)`
/// keeps the memory database alive for the lifetime of the pool.
pub async fn setup_pool() -> DbPool {
    let counter = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let url = format!(
        "sqlite:file:wardplane_test_{}_{}?mode=memory&cache=shared",
        std::process::id(),
        counter
    );

    let options = SqliteConnectOptions::from_str(&url)
        .expect("valid sqlite url")
        .busy_timeout(Duration::from_secs(5))
        .journal_mode(SqliteJournalMode::Memory)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory sqlite pool");

    wardplane::storage::run_migrations(&pool).await.expect("migrations");
    pool
}
