use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::{InventoryItem, ItemKind},
    traits::LedgerError,
};

/// Adds one `item` to the account's inventory, creating the entry if this is the first one. Returns the new quantity.
///
/// Not idempotent: every call adds one more.
pub async fn upsert(account_id: i64, item: ItemKind, conn: &mut SqliteConnection) -> Result<i64, LedgerError> {
    let quantity = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO inventory (account_id, item_code, quantity)
        VALUES ($1, $2, 1)
        ON CONFLICT (account_id, item_code)
        DO UPDATE SET quantity = quantity + 1, updated_at = CURRENT_TIMESTAMP
        RETURNING quantity"#,
    )
    .bind(account_id)
    .bind(item.code())
    .fetch_one(conn)
    .await?;
    trace!("🛍️ Account #{account_id} now holds {quantity} x {item}");
    Ok(quantity)
}

/// The account's inventory as (title, quantity) pairs, in catalog order.
pub async fn inventory_for(account_id: i64, conn: &mut SqliteConnection) -> Result<Vec<InventoryItem>, LedgerError> {
    let items = sqlx::query_as::<_, InventoryItem>(
        r#"
        SELECT catalog.title AS title, inventory.quantity AS quantity
        FROM inventory JOIN catalog ON catalog.code = inventory.item_code
        WHERE inventory.account_id = $1
        ORDER BY inventory.item_code"#,
    )
    .bind(account_id)
    .fetch_all(conn)
    .await?;
    Ok(items)
}
