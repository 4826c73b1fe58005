use std::fmt::Display;

use chrono::{DateTime, Utc};
pub use ledger_common::{Coins, STARTING_BALANCE};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

//--------------------------------------        Account        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Account {
    pub id: i64,
    pub login: String,
    /// Opaque to the ledger. Produced and checked by the identity layer.
    #[serde(skip_serializing)]
    pub credential_hash: String,
    pub balance: Coins,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      NewAccount       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub login: String,
    pub credential_hash: String,
}

impl NewAccount {
    pub fn new<S1: Into<String>, S2: Into<String>>(login: S1, credential_hash: S2) -> Self {
        Self { login: login.into(), credential_hash: credential_hash.into() }
    }
}

#[derive(Debug, Clone)]
pub enum InsertAccountResult {
    Inserted(Account),
    AlreadyExists(String),
}

//--------------------------------------       ItemKind        ---------------------------------------------------------
/// The closed set of goods in the catalog. Titles outside this set map to [`ItemKind::Unknown`], which the catalog
/// never prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    TShirt,
    Cup,
    Book,
    Pen,
    Powerbank,
    Hoody,
    Umbrella,
    Socks,
    Wallet,
    PinkHoody,
    Unknown,
}

impl ItemKind {
    pub const ALL: [ItemKind; 10] = [
        ItemKind::TShirt,
        ItemKind::Cup,
        ItemKind::Book,
        ItemKind::Pen,
        ItemKind::Powerbank,
        ItemKind::Hoody,
        ItemKind::Umbrella,
        ItemKind::Socks,
        ItemKind::Wallet,
        ItemKind::PinkHoody,
    ];

    pub fn from_title(title: &str) -> Self {
        match title {
            "t-shirt" => Self::TShirt,
            "cup" => Self::Cup,
            "book" => Self::Book,
            "pen" => Self::Pen,
            "powerbank" => Self::Powerbank,
            "hoody" => Self::Hoody,
            "umbrella" => Self::Umbrella,
            "socks" => Self::Socks,
            "wallet" => Self::Wallet,
            "pink-hoody" => Self::PinkHoody,
            _ => Self::Unknown,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::TShirt => "t-shirt",
            Self::Cup => "cup",
            Self::Book => "book",
            Self::Pen => "pen",
            Self::Powerbank => "powerbank",
            Self::Hoody => "hoody",
            Self::Umbrella => "umbrella",
            Self::Socks => "socks",
            Self::Wallet => "wallet",
            Self::PinkHoody => "pink-hoody",
            Self::Unknown => "unknown",
        }
    }

    /// The catalog code. `Unknown` is `-1`.
    pub fn code(&self) -> i64 {
        match self {
            Self::Unknown => -1,
            known => Self::ALL.iter().position(|k| k == known).map(|p| p as i64).unwrap_or(-1),
        }
    }

    pub fn from_code(code: i64) -> Self {
        usize::try_from(code).ok().and_then(|i| Self::ALL.get(i).copied()).unwrap_or(Self::Unknown)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl From<&str> for ItemKind {
    fn from(title: &str) -> Self {
        Self::from_title(title)
    }
}

//--------------------------------------      CatalogItem      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CatalogItem {
    pub code: i64,
    pub title: String,
    pub price: Coins,
}

//--------------------------------------     InventoryItem     ---------------------------------------------------------
/// One line of an account's inventory: the item title and how many have been bought.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct InventoryItem {
    pub title: String,
    pub quantity: i64,
}

//--------------------------------------    TransferRecord     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TransferRecord {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub amount: Coins,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------    TransferHistory    ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ReceivedTransfer {
    pub from_user: String,
    pub amount: Coins,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct SentTransfer {
    pub to_user: String,
    pub amount: Coins,
}

/// Both sides of an account's transfer history, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferHistory {
    pub received: Vec<ReceivedTransfer>,
    pub sent: Vec<SentTransfer>,
}

//--------------------------------------    PurchaseReceipt    ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseReceipt {
    pub account_id: i64,
    pub item: ItemKind,
    pub price: Coins,
    /// How many of this item the account holds after the purchase
    pub quantity: i64,
    /// The account balance after the purchase
    pub balance: Coins,
}
