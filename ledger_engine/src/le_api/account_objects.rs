use ledger_common::Coins;
use serde::{Deserialize, Serialize};

use crate::db_types::{InventoryItem, TransferHistory};

/// Everything a user sees about their own account in one read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOverview {
    pub balance: Coins,
    pub inventory: Vec<InventoryItem>,
    pub history: TransferHistory,
}
