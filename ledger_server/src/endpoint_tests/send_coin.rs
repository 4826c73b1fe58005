use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::Utc;
use ledger_common::Coins;
use ledger_engine::{db_types::TransferRecord, LedgerError, LedgerFlowApi};
use serde_json::json;

use super::{
    helpers::{post_request, valid_token},
    mocks::MockLedger,
};
use crate::routes::SendCoinRoute;

fn configure_with(ledger: MockLedger) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = LedgerFlowApi::new(ledger);
        cfg.app_data(web::Data::new(api)).service(web::scope("/api").service(SendCoinRoute::<MockLedger>::new()));
    }
}

fn record(sender_id: i64, amount: Coins) -> TransferRecord {
    TransferRecord { id: 1, sender_id, receiver_id: 2, amount, created_at: Utc::now() }
}

#[actix_web::test]
async fn send_coins() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger
        .expect_transfer()
        .withf(|sender, receiver, amount| *sender == 1 && receiver.to_string() == "bob" && *amount == Coins::from(10))
        .times(1)
        .returning(|sender, _, amount| Ok(record(sender, amount)));
    let token = valid_token(1, "alice");
    let body = json!({"toUser": "bob", "amount": 10});
    let (status, body) = post_request(&token, "/api/sendCoin", body, configure_with(ledger)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[actix_web::test]
async fn non_positive_amounts_never_reach_the_ledger() {
    let _ = env_logger::try_init().ok();
    for amount in [0, -5] {
        let mut ledger = MockLedger::new();
        ledger.expect_transfer().never();
        let token = valid_token(1, "alice");
        let body = json!({"toUser": "bob", "amount": amount});
        let (status, body) = post_request(&token, "/api/sendCoin", body, configure_with(ledger)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("amount must be positive"), "{body}");
    }
}

#[actix_web::test]
async fn empty_receiver() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_transfer().never();
    let token = valid_token(1, "alice");
    let body = json!({"toUser": "", "amount": 10});
    let (status, _) = post_request(&token, "/api/sendCoin", body, configure_with(ledger)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unauthenticated_send() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_transfer().never();
    let body = json!({"toUser": "bob", "amount": 10});
    let (status, _) = post_request("", "/api/sendCoin", body, configure_with(ledger)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn insufficient_funds() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_transfer().returning(|sender, _, amount| {
        Err(LedgerError::InsufficientFunds { account_id: sender, balance: Coins::from(3), required: amount })
    });
    let token = valid_token(1, "alice");
    let body = json!({"toUser": "bob", "amount": 10});
    let (status, body) = post_request(&token, "/api/sendCoin", body, configure_with(ledger)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"errors":"Insufficient funds. Account 1 has 3 coins but 10 coins is needed"}"#);
}

#[actix_web::test]
async fn unknown_receiver() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_transfer().returning(|_, receiver, _| Err(LedgerError::ReceiverNotFound(receiver.to_string())));
    let token = valid_token(1, "alice");
    let body = json!({"toUser": "nobody", "amount": 10});
    let (status, body) = post_request(&token, "/api/sendCoin", body, configure_with(ledger)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("nobody"));
}

#[actix_web::test]
async fn busy_ledger() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_transfer().returning(|_, _, _| Err(LedgerError::Busy("pool timed out".into())));
    let token = valid_token(1, "alice");
    let body = json!({"toUser": "bob", "amount": 10});
    let (status, _) = post_request(&token, "/api/sendCoin", body, configure_with(ledger)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
