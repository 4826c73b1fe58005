use ledger_common::Coins;

use crate::{
    db_types::{Account, CatalogItem, InventoryItem, TransferHistory},
    traits::LedgerError,
};

/// Read-only queries over accounts. None of these take locks, so results reflect the last committed state.
#[allow(async_fn_in_trait)]
pub trait AccountManagement {
    /// Fetches the account with the given id. If no account exists, `None` is returned.
    async fn fetch_account(&self, account_id: i64) -> Result<Option<Account>, LedgerError>;

    async fn fetch_account_by_login(&self, login: &str) -> Result<Option<Account>, LedgerError>;

    async fn fetch_balance(&self, account_id: i64) -> Result<Option<Coins>, LedgerError>;

    /// The account's items as (title, quantity), in catalog order. Empty if nothing has been bought.
    async fn fetch_inventory(&self, account_id: i64) -> Result<Vec<InventoryItem>, LedgerError>;

    async fn fetch_transfer_history(&self, account_id: i64) -> Result<TransferHistory, LedgerError>;

    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, LedgerError>;
}
