//! The account store.
//!
//! Balances only change through [`lock_and_read`] followed by [`adjust`], both inside the same transaction.
use ledger_common::Coins;
use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::{
    db_types::{Account, InsertAccountResult, NewAccount},
    traits::LedgerError,
};

/// Takes the write lock covering `account_id` for the remainder of the enclosing transaction and returns the current
/// balance, or `None` if there is no such account.
///
/// This must be the first statement of the transaction. SQLite only retries a blocked writer (up to the configured
/// busy timeout) if the transaction has not yet read anything; a deferred transaction that reads first and then
/// tries to write can fail immediately with `SQLITE_BUSY_SNAPSHOT`.
pub async fn lock_and_read(account_id: i64, conn: &mut SqliteConnection) -> Result<Option<Coins>, LedgerError> {
    let balance = sqlx::query_scalar::<_, Coins>("UPDATE accounts SET balance = balance WHERE id = $1 RETURNING balance")
        .bind(account_id)
        .fetch_optional(conn)
        .await?;
    trace!("🧑️ Locked account #{account_id}. Balance: {balance:?}");
    Ok(balance)
}

/// Adds `delta` (which may be negative) to the account balance and returns the new balance, or `None` if the account
/// does not exist.
///
/// The caller must already hold the lock from [`lock_and_read`] when debiting. A result below zero is rejected by the
/// column constraint and surfaces as [`LedgerError::InvariantViolation`].
pub async fn adjust(account_id: i64, delta: Coins, conn: &mut SqliteConnection) -> Result<Option<Coins>, LedgerError> {
    let balance = sqlx::query_scalar::<_, Coins>(
        r#"
        UPDATE accounts
        SET balance = balance + $1, updated_at = CURRENT_TIMESTAMP
        WHERE id = $2
        RETURNING balance"#,
    )
    .bind(delta)
    .bind(account_id)
    .fetch_optional(conn)
    .await?;
    trace!("🧑️ Adjusted account #{account_id} by {delta}. New balance: {balance:?}");
    Ok(balance)
}

pub async fn account_by_id(account_id: i64, conn: &mut SqliteConnection) -> Result<Option<Account>, LedgerError> {
    let account = sqlx::query_as::<_, Account>(
        r#"
        SELECT id, login, credential_hash, balance, created_at, updated_at
        FROM accounts
        WHERE id = $1"#,
    )
    .bind(account_id)
    .fetch_optional(conn)
    .await?;
    Ok(account)
}

pub async fn account_by_login(login: &str, conn: &mut SqliteConnection) -> Result<Option<Account>, LedgerError> {
    let account = sqlx::query_as::<_, Account>(
        r#"
        SELECT id, login, credential_hash, balance, created_at, updated_at
        FROM accounts
        WHERE login = $1"#,
    )
    .bind(login)
    .fetch_optional(conn)
    .await?;
    Ok(account)
}

/// Resolves a login to an account id without taking any locks.
pub async fn id_for_login(login: &str, conn: &mut SqliteConnection) -> Result<Option<i64>, LedgerError> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM accounts WHERE login = $1")
        .bind(login)
        .fetch_optional(conn)
        .await?;
    Ok(id)
}

pub async fn balance_of(account_id: i64, conn: &mut SqliteConnection) -> Result<Option<Coins>, LedgerError> {
    let balance = sqlx::query_scalar::<_, Coins>("SELECT balance FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_optional(conn)
        .await?;
    Ok(balance)
}

/// Inserts a new account with the given opening balance.
///
/// If the login is already taken, nothing is written and `AlreadyExists` is returned.
pub async fn insert_account(
    account: NewAccount,
    opening_balance: Coins,
    conn: &mut SqliteConnection,
) -> Result<InsertAccountResult, LedgerError> {
    let result = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (login, credential_hash, balance)
        VALUES ($1, $2, $3)
        RETURNING id, login, credential_hash, balance, created_at, updated_at"#,
    )
    .bind(&account.login)
    .bind(&account.credential_hash)
    .bind(opening_balance)
    .fetch_one(conn)
    .await;
    match result {
        Ok(account) => {
            debug!("🧑️ Created account #{} for '{}' with {opening_balance}", account.id, account.login);
            Ok(InsertAccountResult::Inserted(account))
        },
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            debug!("🧑️ An account for '{}' already exists", account.login);
            Ok(InsertAccountResult::AlreadyExists(account.login))
        },
        Err(e) => Err(e.into()),
    }
}
