//! Coin Ledger Engine
//!
//! The ledger keeps a non-negative coin balance for every account. Accounts can send coins to each other by login and
//! can spend coins on catalog items, which accumulate in a per-account inventory. Every balance-moving operation is
//! atomic and safe under concurrent access: two spends against the same account are serialised by the store's write
//! lock, and a failed operation leaves no trace.
//!
//! The library is divided into two main sections:
//! 1. Storage ([`mod@sqlite`] and [`mod@traits`]). The traits define what a backend must provide; SQLite is the
//!    supported backend. The data types used by the stores are defined in [`mod@db_types`] and are public.
//! 2. The public API ([`mod@le_api`]). Callers should go through [`LedgerFlowApi`], [`ProvisioningApi`] and
//!    [`AccountApi`] rather than the backend directly.
pub mod db_types;
pub mod le_api;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use le_api::{accounts_api::AccountApi, ledger_flow_api::LedgerFlowApi, provisioning_api::ProvisioningApi};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{AccountManagement, AccountProvisioning, LedgerDatabase, LedgerError};
