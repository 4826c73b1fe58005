//! Access tokens.
//!
//! Tokens are HS256 JSON Web Tokens signed with the server's token secret. Besides the standard `iat` and `exp`
//! claims, they carry the account id and login of the holder (see [`AccessClaims`]).
//!
//! Handlers that take an [`AccessClaims`] argument only run for requests carrying a valid, unexpired token in the
//! `Authorization: Bearer <token>` header.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ledger_engine::db_types::Account;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub account_id: i64,
    pub login: String,
    /// Issued at, as a Unix timestamp in seconds
    pub iat: i64,
    /// Expiry, as a Unix timestamp in seconds
    pub exp: i64,
}

impl AccessClaims {
    pub fn new(account: &Account, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            account_id: account.id,
            login: account.login.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.token_secret.reveal().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: config.token_ttl,
        }
    }

    /// Issue a new access token for `account`, valid for the configured lifetime.
    /// This method DOES NOT check the account's credentials. That must be done prior to calling `issue_token`.
    pub fn issue_token(&self, account: &Account) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = AccessClaims::new(account, now, now + self.ttl);
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &AccessClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::CouldNotIssueToken(e.to_string()))
    }

    /// Checks the signature and expiry of `token` and returns its claims.
    pub fn validate(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => {
                debug!("🔐️ Rejected an expired access token");
                AuthError::TokenExpired
            },
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::ValidationError(e.to_string()),
            _ => AuthError::PoorlyFormattedToken(e.to_string()),
        })?;
        Ok(data.claims)
    }
}

impl FromRequest for AccessClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(claims_from_request(req))
    }
}

fn claims_from_request(req: &HttpRequest) -> Result<AccessClaims, ServerError> {
    let issuer = req
        .app_data::<web::Data<TokenIssuer>>()
        .ok_or_else(|| ServerError::ConfigurationError("No token issuer has been configured".into()))?;
    let header = req.headers().get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|e| AuthError::PoorlyFormattedToken(e.to_string()))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::PoorlyFormattedToken("Expected a Bearer token".into()))?;
    let claims = issuer.validate(token.trim())?;
    trace!("🔐️ Request authenticated for '{}' (#{})", claims.login, claims.account_id);
    Ok(claims)
}
