use cucumber::{then, when};
use ledger_engine::{
    db_types::{Coins, InventoryItem, ReceivedTransfer, SentTransfer},
    LedgerError,
};

use crate::cucumber::LedgerWorld;

#[when(expr = "{string} sends {int} to {string}")]
async fn send(world: &mut LedgerWorld, sender: String, amount: i64, receiver: String) {
    let sender = world.account(&sender).await;
    let result = world.system().api.transfer(sender.id, &receiver, Coins::from(amount)).await;
    world.last_error = result.err();
}

#[when(expr = "{string} buys a {string}")]
async fn buy(world: &mut LedgerWorld, login: String, item: String) {
    let account = world.account(&login).await;
    let result = world.system().api.purchase(account.id, &item).await;
    world.last_error = result.err();
}

#[then(expr = "{string} has a balance of {int}")]
async fn check_balance(world: &mut LedgerWorld, login: String, balance: i64) {
    let account = world.account(&login).await;
    let actual = world.system().accounts.balance_of(account.id).await.expect("Error fetching balance");
    assert_eq!(actual, Coins::from(balance));
}

#[then(expr = "{string} owns {int} x {string}")]
async fn check_inventory_line(world: &mut LedgerWorld, login: String, quantity: i64, title: String) {
    let account = world.account(&login).await;
    let inventory = world.system().accounts.inventory_of(account.id).await.expect("Error fetching inventory");
    assert!(
        inventory.contains(&InventoryItem { title: title.clone(), quantity }),
        "Expected {quantity} x {title} in {inventory:?}"
    );
}

#[then(expr = "{string} has an empty inventory")]
async fn check_empty_inventory(world: &mut LedgerWorld, login: String) {
    let account = world.account(&login).await;
    let inventory = world.system().accounts.inventory_of(account.id).await.expect("Error fetching inventory");
    assert!(inventory.is_empty(), "Expected an empty inventory but found {inventory:?}");
}

#[then(expr = "{string} has sent {int} to {string}")]
async fn check_sent(world: &mut LedgerWorld, login: String, amount: i64, receiver: String) {
    let account = world.account(&login).await;
    let history = world.system().accounts.history_of(account.id).await.expect("Error fetching history");
    assert!(history.sent.contains(&SentTransfer { to_user: receiver, amount: Coins::from(amount) }));
}

#[then(expr = "{string} has received {int} from {string}")]
async fn check_received(world: &mut LedgerWorld, login: String, amount: i64, sender: String) {
    let account = world.account(&login).await;
    let history = world.system().accounts.history_of(account.id).await.expect("Error fetching history");
    assert!(history.received.contains(&ReceivedTransfer { from_user: sender, amount: Coins::from(amount) }));
}

#[then(expr = "{string} has no transfer history")]
async fn check_no_history(world: &mut LedgerWorld, login: String) {
    let account = world.account(&login).await;
    let history = world.system().accounts.history_of(account.id).await.expect("Error fetching history");
    assert!(history.sent.is_empty() && history.received.is_empty(), "Unexpected history: {history:?}");
}

#[then("the last operation failed with insufficient funds")]
async fn failed_insufficient_funds(world: &mut LedgerWorld) {
    assert!(
        matches!(world.last_error, Some(LedgerError::InsufficientFunds { .. })),
        "Unexpected result: {:?}",
        world.last_error
    );
}

#[then("the last operation failed because the receiver was not found")]
async fn failed_receiver_not_found(world: &mut LedgerWorld) {
    assert!(matches!(world.last_error, Some(LedgerError::ReceiverNotFound(_))), "Unexpected result: {:?}", world.last_error);
}

#[then("the last operation failed because the item was not found")]
async fn failed_item_not_found(world: &mut LedgerWorld) {
    assert!(matches!(world.last_error, Some(LedgerError::ItemNotFound(_))), "Unexpected result: {:?}", world.last_error);
}
