use std::time::Duration;

use actix_web::{
    dev::Server,
    error::JsonPayloadError,
    http::KeepAlive,
    middleware::Logger,
    web,
    App,
    HttpRequest,
    HttpServer,
};
use ledger_engine::{AccountApi, LedgerFlowApi, ProvisioningApi, SqliteDatabase};
use log::*;

use crate::{
    auth::TokenIssuer,
    config::{AuthConfig, ServerConfig},
    errors::ServerError,
    routes::{health, AuthRoute, BuyRoute, InfoRoute, SendCoinRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_options(&config.database_url, config.max_connections, config.lock_timeout)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.auto_migrate {
        db.migrate().await.map_err(|e| ServerError::InitializeError(format!("Database migration failed. {e}")))?;
    } else {
        info!("💻️ Automatic migrations are disabled. Assuming the database schema is up to date.");
    }
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    // Built once so that every worker signs and checks tokens with the same keys
    let token_issuer = web::Data::new(TokenIssuer::new(&config.auth));
    let auth_config = web::Data::new(config.auth.clone());
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("ledger::access_log"))
            .configure(|cfg| configure_app(cfg, db.clone(), token_issuer.clone(), auth_config.clone()))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers the ledger APIs, the health check and the `/api` routes on `cfg`.
pub fn configure_app(
    cfg: &mut web::ServiceConfig,
    db: SqliteDatabase,
    token_issuer: web::Data<TokenIssuer>,
    auth_config: web::Data<AuthConfig>,
) {
    let api_scope = web::scope("/api")
        .service(AuthRoute::<SqliteDatabase>::new())
        .service(InfoRoute::<SqliteDatabase>::new())
        .service(SendCoinRoute::<SqliteDatabase>::new())
        .service(BuyRoute::<SqliteDatabase>::new());
    cfg.app_data(json_config())
        .app_data(web::Data::new(LedgerFlowApi::new(db.clone())))
        .app_data(web::Data::new(AccountApi::new(db.clone())))
        .app_data(web::Data::new(ProvisioningApi::new(db)))
        .app_data(token_issuer)
        .app_data(auth_config)
        .service(health)
        .service(api_scope);
}

/// Malformed JSON bodies are reported in the same `{"errors": ...}` shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        debug!("💻️ Rejected request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}
