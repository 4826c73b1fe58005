//! Helpers for tests that need a real, migrated ledger database.
pub mod prepare_env;
