use ledger_common::Coins;

use crate::{
    db_types::{ItemKind, PurchaseReceipt, TransferRecord},
    traits::LedgerError,
};

/// The balance-moving half of a ledger backend.
///
/// Implementations must run each method inside exactly one transaction and must take the write lock on every account
/// they debit before reading its balance. Any failure rolls the whole transaction back.
#[allow(async_fn_in_trait)]
pub trait LedgerDatabase {
    /// Moves `amount` from `sender_id` to the account with login `receiver_login`, and logs the transfer.
    ///
    /// Errors, in the order they are checked:
    /// * [`LedgerError::ReceiverNotFound`] if no account has the receiver's login. No lock is taken.
    /// * [`LedgerError::SenderNotFound`] if the sending account does not exist.
    /// * [`LedgerError::InsufficientFunds`] if the sender's balance is less than `amount`.
    ///
    /// `amount` is assumed to be positive. Transfers to oneself are allowed and still logged.
    async fn transfer(&self, sender_id: i64, receiver_login: &str, amount: Coins)
        -> Result<TransferRecord, LedgerError>;

    /// Debits the catalog price of `item` from `account_id` and adds one `item` to its inventory.
    ///
    /// Errors, in the order they are checked:
    /// * [`LedgerError::ItemNotFound`] if `item` is unknown or has no price. No lock is taken.
    /// * [`LedgerError::AccountNotFound`] if the account does not exist.
    /// * [`LedgerError::InsufficientFunds`] if the balance is less than the price.
    async fn purchase(&self, account_id: i64, item: ItemKind) -> Result<PurchaseReceipt, LedgerError>;
}
