//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a few lines MUST delegate to the engine APIs.
//!
//! Every ledger call is asynchronous. Never block the worker thread in a handler: each worker processes its requests
//! sequentially, so a blocking handler stalls every request queued behind it.
use actix_web::{error::BlockingError, get, web, HttpResponse, Responder};
use ledger_engine::{
    AccountApi,
    AccountManagement,
    AccountProvisioning,
    LedgerDatabase,
    LedgerFlowApi,
    ProvisioningApi,
};
use log::*;

use crate::{
    auth::{AccessClaims, TokenIssuer},
    config::AuthConfig,
    data_objects::{AuthRequest, AuthResponse, InfoResponse, SendCoinRequest},
    errors::{AuthError, ServerError},
    helpers::{hash_password, verify_password},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Auth  ----------------------------------------------------
route!(auth => Post "/auth" impl AccountProvisioning);
/// Route handler for the auth endpoint
///
/// Exchanges a username and password for an access token. The first successful call for a username creates the
/// account, with the starting balance, and fixes its password. Later calls must present the same password.
///
/// The token is returned as `{"token": "..."}` and must be supplied on every other `/api` call in an
/// `Authorization: Bearer <token>` header.
pub async fn auth<B: AccountProvisioning>(
    body: web::Json<AuthRequest>,
    api: web::Data<ProvisioningApi<B>>,
    signer: web::Data<TokenIssuer>,
    auth_config: web::Data<AuthConfig>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    request.validate().map_err(ServerError::InvalidRequestBody)?;
    let AuthRequest { username, password } = request;
    trace!("💻️ Received auth request for '{username}'");
    let cost = auth_config.password_cost;
    let candidate = password.clone();
    let new_hash = web::block(move || hash_password(&candidate, cost)).await.map_err(blocking_error)??;
    let account = api.provision_if_absent(&username, &new_hash).await?;
    // A freshly provisioned account carries exactly the hash computed above
    if account.credential_hash != new_hash {
        let stored = account.credential_hash.clone();
        let valid = web::block(move || verify_password(&password, &stored)).await.map_err(blocking_error)?;
        if !valid {
            debug!("💻️ Wrong password for '{username}'");
            return Err(AuthError::InvalidCredentials.into());
        }
    }
    let token = signer.issue_token(&account)?;
    trace!("💻️ Issued access token for '{username}'");
    Ok(HttpResponse::Ok().json(AuthResponse { token }))
}

fn blocking_error(e: BlockingError) -> ServerError {
    ServerError::Unspecified(format!("Blocking task failed. {e}"))
}

//----------------------------------------------   Info  ----------------------------------------------------
route!(info => Get "/info" impl AccountManagement);
/// Balance, inventory and transfer history for the caller.
pub async fn info<B: AccountManagement>(
    claims: AccessClaims,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received info request for account #{}", claims.account_id);
    let overview = api.account_overview(claims.account_id).await?;
    Ok(HttpResponse::Ok().json(InfoResponse::from(overview)))
}

//----------------------------------------------   SendCoin  ----------------------------------------------------
route!(send_coin => Post "/sendCoin" impl LedgerDatabase);
pub async fn send_coin<B: LedgerDatabase>(
    claims: AccessClaims,
    body: web::Json<SendCoinRequest>,
    api: web::Data<LedgerFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let SendCoinRequest { to_user, amount } = body.into_inner();
    trace!("💻️ Received sendCoin request: {amount} from #{} to '{to_user}'", claims.account_id);
    if to_user.is_empty() {
        return Err(ServerError::InvalidRequestBody("toUser is required".into()));
    }
    if !amount.is_positive() {
        return Err(ServerError::InvalidRequestBody("amount must be positive".into()));
    }
    api.transfer(claims.account_id, &to_user, amount).await?;
    Ok(HttpResponse::Ok().finish())
}

//----------------------------------------------   Buy  ----------------------------------------------------
route!(buy => Get "/buy/{item}" impl LedgerDatabase);
pub async fn buy<B: LedgerDatabase>(
    claims: AccessClaims,
    path: web::Path<String>,
    api: web::Data<LedgerFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let item = path.into_inner();
    trace!("💻️ Received buy request for '{item}' from #{}", claims.account_id);
    api.purchase(claims.account_id, &item).await?;
    Ok(HttpResponse::Ok().finish())
}
