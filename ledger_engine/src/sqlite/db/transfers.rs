//! The transfer log. Records are only ever appended.
use chrono::{DateTime, Utc};
use ledger_common::Coins;
use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::{ReceivedTransfer, SentTransfer, TransferRecord},
    traits::LedgerError,
};

pub async fn append(
    sender_id: i64,
    receiver_id: i64,
    amount: Coins,
    timestamp: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<TransferRecord, LedgerError> {
    let record = sqlx::query_as::<_, TransferRecord>(
        r#"
        INSERT INTO transfers (sender_id, receiver_id, amount, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, sender_id, receiver_id, amount, created_at"#,
    )
    .bind(sender_id)
    .bind(receiver_id)
    .bind(amount)
    .bind(timestamp)
    .fetch_one(conn)
    .await?;
    trace!("💸️ Logged transfer #{} of {amount} from #{sender_id} to #{receiver_id}", record.id);
    Ok(record)
}

/// Transfers into `account_id`, labelled with the sender's current login, oldest first.
pub async fn received_by(account_id: i64, conn: &mut SqliteConnection) -> Result<Vec<ReceivedTransfer>, LedgerError> {
    let transfers = sqlx::query_as::<_, ReceivedTransfer>(
        r#"
        SELECT accounts.login AS from_user, transfers.amount AS amount
        FROM transfers JOIN accounts ON accounts.id = transfers.sender_id
        WHERE transfers.receiver_id = $1
        ORDER BY transfers.id"#,
    )
    .bind(account_id)
    .fetch_all(conn)
    .await?;
    Ok(transfers)
}

/// Transfers out of `account_id`, labelled with the receiver's current login, oldest first.
pub async fn sent_by(account_id: i64, conn: &mut SqliteConnection) -> Result<Vec<SentTransfer>, LedgerError> {
    let transfers = sqlx::query_as::<_, SentTransfer>(
        r#"
        SELECT accounts.login AS to_user, transfers.amount AS amount
        FROM transfers JOIN accounts ON accounts.id = transfers.receiver_id
        WHERE transfers.sender_id = $1
        ORDER BY transfers.id"#,
    )
    .bind(account_id)
    .fetch_all(conn)
    .await?;
    Ok(transfers)
}
