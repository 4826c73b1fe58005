//! # SQLite Database methods
//!
//! This module contains the "low-level" ledger stores: accounts, catalog, inventory and the transfer log.
//!
//! All these interactions are simple functions (rather than stateful structs) that accept a `&mut SqliteConnection`
//! argument. Callers can obtain a connection from a pool, or open an atomic transaction as the need arises and call
//! through to the functions without any other changes.
use std::{env, str::FromStr, time::Duration};

use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Error as SqlxError,
    SqlitePool,
};

pub mod accounts;
pub mod catalog;
pub mod inventory;
pub mod transfers;

const SQLITE_DB_URL: &str = "sqlite://data/ledger.db";
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

pub fn db_url() -> String {
    let result = env::var("LE_DATABASE_URL").unwrap_or_else(|_| {
        info!("LE_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

/// Opens a connection pool against `url`.
///
/// `lock_timeout` bounds how long a connection waits for another writer to release the database lock before the
/// statement fails with `SQLITE_BUSY`. It also bounds how long a caller waits for a free connection.
pub async fn new_pool(url: &str, max_connections: u32, lock_timeout: Duration) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(lock_timeout)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(lock_timeout)
        .connect_with(options)
        .await?;
    Ok(pool)
}
