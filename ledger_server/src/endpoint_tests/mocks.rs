use ledger_common::Coins;
use ledger_engine::{
    db_types::{Account, CatalogItem, InventoryItem, ItemKind, NewAccount, PurchaseReceipt, TransferHistory, TransferRecord},
    AccountManagement,
    AccountProvisioning,
    LedgerDatabase,
    LedgerError,
};
use mockall::mock;

mock! {
    pub Ledger {}
    impl LedgerDatabase for Ledger {
        async fn transfer(&self, sender_id: i64, receiver_login: &str, amount: Coins) -> Result<TransferRecord, LedgerError>;
        async fn purchase(&self, account_id: i64, item: ItemKind) -> Result<PurchaseReceipt, LedgerError>;
    }
}

mock! {
    pub AccountManager {}
    impl AccountManagement for AccountManager {
        async fn fetch_account(&self, account_id: i64) -> Result<Option<Account>, LedgerError>;
        async fn fetch_account_by_login(&self, login: &str) -> Result<Option<Account>, LedgerError>;
        async fn fetch_balance(&self, account_id: i64) -> Result<Option<Coins>, LedgerError>;
        async fn fetch_inventory(&self, account_id: i64) -> Result<Vec<InventoryItem>, LedgerError>;
        async fn fetch_transfer_history(&self, account_id: i64) -> Result<TransferHistory, LedgerError>;
        async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, LedgerError>;
    }
}

mock! {
    pub Provisioner {}
    impl AccountProvisioning for Provisioner {
        async fn provision_if_absent(&self, account: NewAccount) -> Result<Account, LedgerError>;
    }
}
