use ledger_common::Coins;
use ledger_engine::{
    db_types::{InventoryItem, ReceivedTransfer, SentTransfer},
    le_api::account_objects::AccountOverview,
};
use serde::{Deserialize, Serialize};

/// Longest accepted login, in bytes.
pub const MAX_USERNAME_LENGTH: usize = 32;
/// Longest accepted password, in bytes.
pub const MAX_PASSWORD_LENGTH: usize = 72;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

impl AuthRequest {
    /// Returns a description of the first problem with the request, if any.
    pub fn validate(&self) -> Result<(), String> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err("username and password are required".into());
        }
        if self.username.len() > MAX_USERNAME_LENGTH {
            return Err(format!("username must be at most {MAX_USERNAME_LENGTH} bytes"));
        }
        if self.password.len() > MAX_PASSWORD_LENGTH {
            return Err(format!("password must be at most {MAX_PASSWORD_LENGTH} bytes"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCoinRequest {
    pub to_user: String,
    pub amount: Coins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLine {
    #[serde(rename = "type")]
    pub item_type: String,
    pub quantity: i64,
}

impl From<InventoryItem> for InventoryLine {
    fn from(item: InventoryItem) -> Self {
        Self { item_type: item.title, quantity: item.quantity }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedLine {
    pub from_user: String,
    pub amount: Coins,
}

impl From<ReceivedTransfer> for ReceivedLine {
    fn from(t: ReceivedTransfer) -> Self {
        Self { from_user: t.from_user, amount: t.amount }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentLine {
    pub to_user: String,
    pub amount: Coins,
}

impl From<SentTransfer> for SentLine {
    fn from(t: SentTransfer) -> Self {
        Self { to_user: t.to_user, amount: t.amount }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinHistory {
    pub received: Vec<ReceivedLine>,
    pub sent: Vec<SentLine>,
}

/// The body of `GET /api/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub coins: Coins,
    pub inventory: Vec<InventoryLine>,
    pub coin_history: CoinHistory,
}

impl From<AccountOverview> for InfoResponse {
    fn from(overview: AccountOverview) -> Self {
        let AccountOverview { balance, inventory, history } = overview;
        Self {
            coins: balance,
            inventory: inventory.into_iter().map(InventoryLine::from).collect(),
            coin_history: CoinHistory {
                received: history.received.into_iter().map(ReceivedLine::from).collect(),
                sent: history.sent.into_iter().map(SentLine::from).collect(),
            },
        }
    }
}
