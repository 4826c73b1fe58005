//! Unifies API for reading accounts.

use std::fmt::Debug;

use ledger_common::Coins;
use log::trace;

use crate::{
    db_types::{Account, CatalogItem, InventoryItem, TransferHistory},
    le_api::account_objects::AccountOverview,
    traits::{AccountManagement, LedgerError},
};

/// The `AccountApi` provides the read-only projections over accounts.
pub struct AccountApi<B> {
    db: B,
}

impl<B: Debug> Debug for AccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountApi ({:?})", self.db)
    }
}

impl<B> AccountApi<B>
where B: AccountManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Fetches the account for the given account id. If no account exists, `None` is returned.
    pub async fn account_by_id(&self, account_id: i64) -> Result<Option<Account>, LedgerError> {
        self.db.fetch_account(account_id).await
    }

    pub async fn account_by_login(&self, login: &str) -> Result<Option<Account>, LedgerError> {
        self.db.fetch_account_by_login(login).await
    }

    pub async fn balance_of(&self, account_id: i64) -> Result<Coins, LedgerError> {
        self.db.fetch_balance(account_id).await?.ok_or(LedgerError::AccountNotFound(account_id))
    }

    pub async fn inventory_of(&self, account_id: i64) -> Result<Vec<InventoryItem>, LedgerError> {
        self.db.fetch_inventory(account_id).await
    }

    pub async fn history_of(&self, account_id: i64) -> Result<TransferHistory, LedgerError> {
        self.db.fetch_transfer_history(account_id).await
    }

    /// Balance, inventory and transfer history for the account. Fails with [`LedgerError::AccountNotFound`] if the
    /// account does not exist.
    pub async fn account_overview(&self, account_id: i64) -> Result<AccountOverview, LedgerError> {
        let balance = self.balance_of(account_id).await?;
        let inventory = self.inventory_of(account_id).await?;
        let history = self.history_of(account_id).await?;
        trace!(
            "🧑️ Account #{account_id}: {balance}, {} inventory lines, {} received, {} sent",
            inventory.len(),
            history.received.len(),
            history.sent.len()
        );
        Ok(AccountOverview { balance, inventory, history })
    }

    pub async fn catalog(&self) -> Result<Vec<CatalogItem>, LedgerError> {
        self.db.fetch_catalog().await
    }
}
