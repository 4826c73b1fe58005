use ledger_common::Coins;
use sqlx::SqliteConnection;

use crate::{
    db_types::{CatalogItem, ItemKind},
    traits::LedgerError,
};

/// The catalog price for `item`, or `None` if the catalog has no entry for it.
pub async fn price_of(item: ItemKind, conn: &mut SqliteConnection) -> Result<Option<Coins>, LedgerError> {
    if !item.is_known() {
        return Ok(None);
    }
    let price = sqlx::query_scalar::<_, Coins>("SELECT price FROM catalog WHERE code = $1")
        .bind(item.code())
        .fetch_optional(conn)
        .await?;
    Ok(price)
}

pub async fn fetch_catalog(conn: &mut SqliteConnection) -> Result<Vec<CatalogItem>, LedgerError> {
    let items = sqlx::query_as::<_, CatalogItem>("SELECT code, title, price FROM catalog ORDER BY code")
        .fetch_all(conn)
        .await?;
    Ok(items)
}
