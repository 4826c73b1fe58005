//! # Ledger backend contracts
//!
//! This module defines the behaviour a storage backend must expose to host the ledger.
//!
//! * [`LedgerDatabase`] performs the two balance-moving operations, transfers and purchases, each as one atomic unit.
//! * [`AccountProvisioning`] creates an account, with the starting grant, the first time an identity is seen.
//! * [`AccountManagement`] provides the read-only projections: balances, inventories and transfer histories.
//!
//! Every method reports failures with the one error taxonomy, [`LedgerError`].
mod account_management;
mod account_provisioning;
mod errors;
mod ledger_database;

pub use account_management::AccountManagement;
pub use account_provisioning::AccountProvisioning;
pub use errors::LedgerError;
pub use ledger_database::LedgerDatabase;
