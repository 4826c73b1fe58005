use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Account, NewAccount},
    traits::{AccountProvisioning, LedgerError},
};

/// Creates accounts the first time an identity is seen.
pub struct ProvisioningApi<B> {
    db: B,
}

impl<B: Debug> Debug for ProvisioningApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProvisioningApi ({:?})", self.db)
    }
}

impl<B> ProvisioningApi<B>
where B: AccountProvisioning
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Returns the account for `login`, creating it with the starting balance and `credential_hash` if it does not
    /// exist. The credential hash of an existing account is left untouched, so callers must verify credentials
    /// against the returned account.
    pub async fn provision_if_absent(&self, login: &str, credential_hash: &str) -> Result<Account, LedgerError> {
        trace!("🧑️ Provisioning account for '{login}'");
        self.db.provision_if_absent(NewAccount::new(login, credential_hash)).await
    }
}
