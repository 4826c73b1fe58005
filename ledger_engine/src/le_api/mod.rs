//! # Ledger public API
//!
//! The `le_api` module exposes the programmatic API for the ledger. The API is modular, so that callers can pick the
//! functionality they need:
//!
//! * [`ledger_flow_api`] moves coins: peer-to-peer transfers and catalog purchases.
//! * [`provisioning_api`] creates accounts, with their starting grant, on first sight of an identity.
//! * [`accounts_api`] reads balances, inventories and transfer histories.
//!
//! # API usage
//!
//! An API instance is created by supplying a database backend that implements the backend traits it needs:
//!
//! ```rust,ignore
//! use ledger_engine::{LedgerFlowApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! // SqliteDatabase implements LedgerDatabase
//! let api = LedgerFlowApi::new(db);
//! let receipt = api.purchase(account_id, "t-shirt").await?;
//! ```
pub mod account_objects;
pub mod accounts_api;
pub mod ledger_flow_api;
pub mod provisioning_api;
