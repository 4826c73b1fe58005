//! `SqliteDatabase` is a concrete implementation of a ledger backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`traits`] module.
//!
//! SQLite's write lock covers the whole database rather than a single account row. Every guarantee the traits ask
//! for still holds; writes to unrelated accounts are simply serialised too.
//!
//! [`traits`]: crate::traits
use std::{fmt::Debug, time::Duration};

use chrono::Utc;
use ledger_common::{Coins, STARTING_BALANCE};
use log::*;
use sqlx::{migrate, SqlitePool};

use super::db::{accounts, catalog, db_url, inventory, new_pool, transfers, DEFAULT_LOCK_TIMEOUT};
use crate::{
    db_types::{
        Account,
        CatalogItem,
        InsertAccountResult,
        InventoryItem,
        ItemKind,
        NewAccount,
        PurchaseReceipt,
        TransferHistory,
        TransferRecord,
    },
    traits::{AccountManagement, AccountProvisioning, LedgerDatabase, LedgerError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl LedgerDatabase for SqliteDatabase {
    async fn transfer(
        &self,
        sender_id: i64,
        receiver_login: &str,
        amount: Coins,
    ) -> Result<TransferRecord, LedgerError> {
        // Logins never change and accounts are never deleted, so the receiver can be resolved before the write lock
        // is taken. An unknown receiver then never blocks the sender.
        let receiver_id = {
            let mut conn = self.pool.acquire().await?;
            accounts::id_for_login(receiver_login, &mut conn).await?
        }
        .ok_or_else(|| LedgerError::ReceiverNotFound(receiver_login.to_string()))?;

        let mut tx = self.pool.begin().await?;
        let balance = accounts::lock_and_read(sender_id, &mut tx).await?.ok_or(LedgerError::SenderNotFound(sender_id))?;
        if balance < amount {
            debug!("💸️ Account #{sender_id} cannot send {amount} with a balance of {balance}");
            tx.rollback().await?;
            return Err(LedgerError::InsufficientFunds { account_id: sender_id, balance, required: amount });
        }
        accounts::adjust(sender_id, -amount, &mut tx).await?.ok_or(LedgerError::SenderNotFound(sender_id))?;
        accounts::adjust(receiver_id, amount, &mut tx)
            .await?
            .ok_or_else(|| LedgerError::ReceiverNotFound(receiver_login.to_string()))?;
        let record = transfers::append(sender_id, receiver_id, amount, Utc::now(), &mut tx).await?;
        tx.commit().await?;
        debug!("💸️ Transfer #{} complete. {amount} moved from #{sender_id} to #{receiver_id}", record.id);
        Ok(record)
    }

    async fn purchase(&self, account_id: i64, item: ItemKind) -> Result<PurchaseReceipt, LedgerError> {
        if !item.is_known() {
            return Err(LedgerError::ItemNotFound(item.to_string()));
        }
        // The catalog is read-only reference data, so pricing happens outside the transaction.
        let price = {
            let mut conn = self.pool.acquire().await?;
            catalog::price_of(item, &mut conn).await?
        }
        .ok_or_else(|| {
            warn!("🛍️ {item} is a known item but has no price in the catalog");
            LedgerError::ItemNotFound(item.to_string())
        })?;

        let mut tx = self.pool.begin().await?;
        let balance =
            accounts::lock_and_read(account_id, &mut tx).await?.ok_or(LedgerError::AccountNotFound(account_id))?;
        if balance < price {
            debug!("🛍️ Account #{account_id} cannot afford {item} ({price}) with a balance of {balance}");
            tx.rollback().await?;
            return Err(LedgerError::InsufficientFunds { account_id, balance, required: price });
        }
        let balance =
            accounts::adjust(account_id, -price, &mut tx).await?.ok_or(LedgerError::AccountNotFound(account_id))?;
        let quantity = inventory::upsert(account_id, item, &mut tx).await?;
        tx.commit().await?;
        debug!("🛍️ Account #{account_id} bought {item} for {price}. Balance is now {balance}");
        Ok(PurchaseReceipt { account_id, item, price, quantity, balance })
    }
}

impl AccountProvisioning for SqliteDatabase {
    async fn provision_if_absent(&self, account: NewAccount) -> Result<Account, LedgerError> {
        {
            let mut conn = self.pool.acquire().await?;
            if let Some(existing) = accounts::account_by_login(&account.login, &mut conn).await? {
                trace!("🧑️ Account for '{}' already exists (#{})", existing.login, existing.id);
                return Ok(existing);
            }
        }
        let mut tx = self.pool.begin().await?;
        match accounts::insert_account(account, STARTING_BALANCE, &mut tx).await? {
            InsertAccountResult::Inserted(account) => {
                tx.commit().await?;
                info!("🧑️ New account #{} provisioned for '{}'", account.id, account.login);
                Ok(account)
            },
            InsertAccountResult::AlreadyExists(login) => {
                tx.rollback().await?;
                debug!("🧑️ Lost the race to create '{login}'. Using the existing account");
                let mut conn = self.pool.acquire().await?;
                accounts::account_by_login(&login, &mut conn).await?.ok_or_else(|| {
                    LedgerError::InvariantViolation(format!("Login '{login}' is taken but has no account"))
                })
            },
        }
    }
}

impl AccountManagement for SqliteDatabase {
    async fn fetch_account(&self, account_id: i64) -> Result<Option<Account>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        accounts::account_by_id(account_id, &mut conn).await
    }

    async fn fetch_account_by_login(&self, login: &str) -> Result<Option<Account>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        accounts::account_by_login(login, &mut conn).await
    }

    async fn fetch_balance(&self, account_id: i64) -> Result<Option<Coins>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        accounts::balance_of(account_id, &mut conn).await
    }

    async fn fetch_inventory(&self, account_id: i64) -> Result<Vec<InventoryItem>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        inventory::inventory_for(account_id, &mut conn).await
    }

    async fn fetch_transfer_history(&self, account_id: i64) -> Result<TransferHistory, LedgerError> {
        // Both halves come from the same snapshot
        let mut tx = self.pool.begin().await?;
        let received = transfers::received_by(account_id, &mut tx).await?;
        let sent = transfers::sent_by(account_id, &mut tx).await?;
        tx.commit().await?;
        Ok(TransferHistory { received, sent })
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        catalog::fetch_catalog(&mut conn).await
    }
}

impl SqliteDatabase {
    /// Creates a new database API object, using `LE_DATABASE_URL` and the default lock timeout.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        SqliteDatabase::new_with_options(url, max_connections, DEFAULT_LOCK_TIMEOUT).await
    }

    /// `lock_timeout` is how long an operation waits for a contended lock before failing with
    /// [`LedgerError::Busy`].
    pub async fn new_with_options(url: &str, max_connections: u32, lock_timeout: Duration) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections, lock_timeout).await?;
        Ok(Self { pool })
    }

    /// Brings the schema (and the seeded catalog) up to date.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&mut self) -> Result<(), sqlx::Error> {
        self.pool.close().await;
        Ok(())
    }
}
