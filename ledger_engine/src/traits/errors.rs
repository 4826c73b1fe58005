use ledger_common::Coins;
use log::error;
use thiserror::Error;

/// Every way a ledger operation can fail.
///
/// The first five variants are ordinary business outcomes and are safe to show to the caller as-is. `Busy` and
/// `StoreUnavailable` are mechanical and may be retried by the caller. `InvariantViolation` means the concurrency
/// control has been defeated and must be alerted on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Account {0} does not exist")]
    AccountNotFound(i64),
    #[error("Sending account {0} does not exist")]
    SenderNotFound(i64),
    #[error("There is no user with login '{0}'")]
    ReceiverNotFound(String),
    #[error("'{0}' is not in the catalog")]
    ItemNotFound(String),
    #[error("Insufficient funds. Account {account_id} has {balance} but {required} is needed")]
    InsufficientFunds { account_id: i64, balance: Coins, required: Coins },
    #[error("The ledger is busy. Try again shortly. {0}")]
    Busy(String),
    #[error("The ledger store is unavailable. {0}")]
    StoreUnavailable(String),
    #[error("Ledger invariant violated. {0}")]
    InvariantViolation(String),
}

impl LedgerError {
    /// Expected outcomes of a well-formed request that the caller should see verbatim.
    pub fn is_business_error(&self) -> bool {
        matches!(
            self,
            Self::AccountNotFound(_) |
                Self::SenderNotFound(_) |
                Self::ReceiverNotFound(_) |
                Self::ItemNotFound(_) |
                Self::InsufficientFunds { .. }
        )
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Busy(_) | Self::StoreUnavailable(_))
    }
}

// SQLite primary result codes. Extended codes carry the primary code in the low byte.
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::PoolTimedOut => Self::Busy("Timed out waiting for a database connection".into()),
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                error!("🗃️ A ledger constraint was violated. This is a bug. {db_err}");
                Self::InvariantViolation(db_err.to_string())
            },
            sqlx::Error::Database(db_err) => {
                let primary_code =
                    db_err.code().and_then(|c| c.parse::<i32>().ok()).map(|c| c & 0xff).unwrap_or_default();
                match primary_code {
                    SQLITE_BUSY | SQLITE_LOCKED => Self::Busy(db_err.to_string()),
                    _ => Self::StoreUnavailable(db_err.to_string()),
                }
            },
            _ => Self::StoreUnavailable(e.to_string()),
        }
    }
}
