use cucumber::given;

use crate::cucumber::{ledger_world::LedgerSystem, LedgerWorld};

#[given("a fresh install")]
async fn fresh_database(world: &mut LedgerWorld) {
    let system = LedgerSystem::new().await;
    world.system = Some(system);
}

#[given(expr = "a user {string}")]
async fn a_user(world: &mut LedgerWorld, login: String) {
    world.system().provisioning.provision_if_absent(&login, "not-a-real-hash").await.expect("Error creating user");
}
