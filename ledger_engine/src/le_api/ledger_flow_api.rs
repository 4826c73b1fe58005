use std::fmt::Debug;

use ledger_common::Coins;
use log::*;

use crate::{
    db_types::{ItemKind, PurchaseReceipt, TransferRecord},
    traits::{LedgerDatabase, LedgerError},
};

/// `LedgerFlowApi` is the API for operations that move coins: transfers between accounts and purchases from the
/// catalog.
pub struct LedgerFlowApi<B> {
    db: B,
}

impl<B: Debug> Debug for LedgerFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LedgerFlowApi ({:?})", self.db)
    }
}

impl<B> LedgerFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}

impl<B> LedgerFlowApi<B>
where B: LedgerDatabase
{
    /// Sends `amount` from `sender_id` to the account with login `receiver_login`.
    ///
    /// The amount must be positive; that is the caller's responsibility.
    pub async fn transfer(
        &self,
        sender_id: i64,
        receiver_login: &str,
        amount: Coins,
    ) -> Result<TransferRecord, LedgerError> {
        trace!("💸️ Account #{sender_id} wants to send {amount} to '{receiver_login}'");
        let result = self.db.transfer(sender_id, receiver_login, amount).await;
        if let Err(e) = &result {
            log_failure("💸️ Transfer", e);
        }
        result
    }

    /// Buys one `item_title` for `account_id`.
    ///
    /// Titles outside the catalog are rejected with [`LedgerError::ItemNotFound`] before the backend is touched.
    pub async fn purchase(&self, account_id: i64, item_title: &str) -> Result<PurchaseReceipt, LedgerError> {
        let item = ItemKind::from_title(item_title);
        if !item.is_known() {
            debug!("🛍️ Account #{account_id} asked for '{item_title}', which is not in the catalog");
            return Err(LedgerError::ItemNotFound(item_title.to_string()));
        }
        trace!("🛍️ Account #{account_id} wants to buy {item}");
        let result = self.db.purchase(account_id, item).await;
        if let Err(e) = &result {
            log_failure("🛍️ Purchase", e);
        }
        result
    }
}

fn log_failure(what: &str, e: &LedgerError) {
    match e {
        LedgerError::InvariantViolation(_) => error!("{what} tripped a ledger invariant. {e}"),
        e if e.is_business_error() => debug!("{what} rejected. {e}"),
        _ => warn!("{what} failed. {e}"),
    }
}
