use actix_web::{http::StatusCode, web, web::ServiceConfig};
use ledger_common::Coins;
use ledger_engine::{
    db_types::{ItemKind, PurchaseReceipt},
    LedgerError,
    LedgerFlowApi,
};

use super::{
    helpers::{get_request, valid_token},
    mocks::MockLedger,
};
use crate::routes::BuyRoute;

fn configure_with(ledger: MockLedger) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = LedgerFlowApi::new(ledger);
        cfg.app_data(web::Data::new(api)).service(web::scope("/api").service(BuyRoute::<MockLedger>::new()));
    }
}

#[actix_web::test]
async fn buy_an_item() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_purchase().withf(|id, item| *id == 4 && *item == ItemKind::Hoody).times(1).returning(|id, item| {
        Ok(PurchaseReceipt {
            account_id: id,
            item,
            price: Coins::from(300),
            quantity: 1,
            balance: Coins::from(700),
        })
    });
    let token = valid_token(4, "dave");
    let (status, body) = get_request(&token, "/api/buy/hoody", configure_with(ledger)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[actix_web::test]
async fn unknown_items_never_reach_the_ledger() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_purchase().never();
    let token = valid_token(4, "dave");
    let (status, body) = get_request(&token, "/api/buy/spaceship", configure_with(ledger)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"errors":"'spaceship' is not in the catalog"}"#);
}

#[actix_web::test]
async fn cannot_afford_item() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_purchase().returning(|id, _| {
        Err(LedgerError::InsufficientFunds { account_id: id, balance: Coins::from(20), required: Coins::from(500) })
    });
    let token = valid_token(4, "dave");
    let (status, body) = get_request(&token, "/api/buy/pink-hoody", configure_with(ledger)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Insufficient funds"));
}

#[actix_web::test]
async fn invariant_violations_are_hidden() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger
        .expect_purchase()
        .returning(|_, _| Err(LedgerError::InvariantViolation("CHECK constraint failed: balance >= 0".into())));
    let token = valid_token(4, "dave");
    let (status, body) = get_request(&token, "/api/buy/cup", configure_with(ledger)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"errors":"Internal server error"}"#);
}

#[actix_web::test]
async fn buy_requires_a_token() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_purchase().never();
    let (status, _) = get_request("", "/api/buy/cup", configure_with(ledger)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
