use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{Duration, Utc};
use ledger_common::Coins;
use ledger_engine::{
    db_types::{InventoryItem, ReceivedTransfer, SentTransfer, TransferHistory},
    AccountApi,
};
use serde_json::json;

use super::{
    helpers::{get_request, issue_token, valid_token},
    mocks::MockAccountManager,
};
use crate::routes::InfoRoute;

fn configure_with(accounts: MockAccountManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = AccountApi::new(accounts);
        cfg.app_data(web::Data::new(api)).service(web::scope("/api").service(InfoRoute::<MockAccountManager>::new()));
    }
}

fn unused_accounts() -> MockAccountManager {
    let mut accounts = MockAccountManager::new();
    accounts.expect_fetch_balance().never();
    accounts
}

fn populated_accounts() -> MockAccountManager {
    let mut accounts = MockAccountManager::new();
    accounts.expect_fetch_balance().withf(|id| *id == 3).returning(|_| Ok(Some(Coins::from(840))));
    accounts
        .expect_fetch_inventory()
        .returning(|_| Ok(vec![InventoryItem { title: "t-shirt".into(), quantity: 2 }]));
    accounts.expect_fetch_transfer_history().returning(|_| {
        Ok(TransferHistory {
            received: vec![ReceivedTransfer { from_user: "bob".into(), amount: Coins::from(5) }],
            sent: vec![SentTransfer { to_user: "carol".into(), amount: Coins::from(45) }],
        })
    });
    accounts
}

#[actix_web::test]
async fn missing_token() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/api/info", configure_with(unused_accounts())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("errors"));
}

#[actix_web::test]
async fn expired_token() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(3, "alice", Utc::now() - Duration::minutes(1));
    let (status, _) = get_request(&token, "/api/info", configure_with(unused_accounts())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn garbage_token() {
    let _ = env_logger::try_init().ok();
    let (status, _) = get_request("not-a-token", "/api/info", configure_with(unused_accounts())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn info_for_account() {
    let _ = env_logger::try_init().ok();
    let token = valid_token(3, "alice");
    let (status, body) = get_request(&token, "/api/info", configure_with(populated_accounts())).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).expect("Failed to parse info response");
    assert_eq!(
        json,
        json!({
            "coins": 840,
            "inventory": [{"type": "t-shirt", "quantity": 2}],
            "coinHistory": {
                "received": [{"fromUser": "bob", "amount": 5}],
                "sent": [{"toUser": "carol", "amount": 45}]
            }
        })
    );
}

#[actix_web::test]
async fn info_for_deleted_account() {
    let _ = env_logger::try_init().ok();
    let mut accounts = MockAccountManager::new();
    accounts.expect_fetch_balance().returning(|_| Ok(None));
    accounts.expect_fetch_inventory().returning(|_| Ok(vec![]));
    accounts.expect_fetch_transfer_history().returning(|_| Ok(TransferHistory::default()));
    let token = valid_token(99, "ghost");
    let (status, body) = get_request(&token, "/api/info", configure_with(accounts)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"errors":"Account 99 does not exist"}"#);
}
