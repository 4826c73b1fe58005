use actix_web::{
    http::{header::AUTHORIZATION, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use chrono::{DateTime, Duration, Utc};
use ledger_common::STARTING_BALANCE;
use ledger_engine::db_types::Account;
use log::debug;

use crate::{
    auth::{AccessClaims, TokenIssuer},
    config::AuthConfig,
    server::json_config,
};

// DO NOT re-use this secret anywhere.
const TEST_SECRET: &str = "endpoint-tests-only-c0a1e5f1b2d3";
pub const TEST_PASSWORD_COST: u32 = 4;

pub fn auth_config() -> AuthConfig {
    AuthConfig::new(TEST_SECRET, Duration::days(14)).with_password_cost(TEST_PASSWORD_COST)
}

pub fn token_issuer() -> TokenIssuer {
    TokenIssuer::new(&auth_config())
}

pub fn test_account(id: i64, login: &str, credential_hash: &str) -> Account {
    Account {
        id,
        login: login.to_string(),
        credential_hash: credential_hash.to_string(),
        balance: STARTING_BALANCE,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn issue_token(account_id: i64, login: &str, expiry: DateTime<Utc>) -> String {
    let claims =
        AccessClaims { account_id, login: login.to_string(), iat: Utc::now().timestamp(), exp: expiry.timestamp() };
    token_issuer().sign(&claims).expect("Failed to sign token")
}

pub fn valid_token(account_id: i64, login: &str) -> String {
    issue_token(account_id, login, Utc::now() + Duration::days(1))
}

pub async fn call<F>(req: TestRequest, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let app = App::new()
        .app_data(web::Data::new(token_issuer()))
        .app_data(web::Data::new(auth_config()))
        .app_data(json_config())
        .configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub async fn get_request<F>(token: &str, path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let mut req = TestRequest::get().uri(path);
    if !token.is_empty() {
        req = req.insert_header((AUTHORIZATION, format!("Bearer {token}")));
    }
    call(req, configure).await
}

pub async fn post_request<F>(token: &str, path: &str, body: serde_json::Value, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let mut req = TestRequest::post().uri(path).set_json(body);
    if !token.is_empty() {
        req = req.insert_header((AUTHORIZATION, format!("Bearer {token}")));
    }
    call(req, configure).await
}
