use crate::{
    db_types::{Account, NewAccount},
    traits::LedgerError,
};

#[allow(async_fn_in_trait)]
pub trait AccountProvisioning {
    /// Returns the account for `account.login`, creating it with the starting balance if it does not exist yet.
    ///
    /// An existing account is returned unchanged; in particular its credential hash is not replaced. If two callers
    /// race to create the same login, exactly one account is created and both receive it.
    async fn provision_if_absent(&self, account: NewAccount) -> Result<Account, LedgerError>;
}
