use std::{env, time::Duration as StdDuration};

use chrono::Duration;
use ledger_common::{helpers::parse_boolean_flag, Secret};
use log::*;
use rand::{thread_rng, RngCore};

use crate::errors::ServerError;

const DEFAULT_LE_HOST: &str = "127.0.0.1";
const DEFAULT_LE_PORT: u16 = 8080;
const DEFAULT_LE_DATABASE_URL: &str = "sqlite://data/ledger.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 25;
const DEFAULT_LOCK_TIMEOUT: StdDuration = StdDuration::from_secs(5);
const DEFAULT_TOKEN_TTL: Duration = Duration::days(14);
const MIN_PASSWORD_COST: u32 = 4;
const MAX_PASSWORD_COST: u32 = 31;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The size of the database connection pool.
    pub max_connections: u32,
    /// How long a ledger operation waits on a contended account before giving up with a retryable error.
    pub lock_timeout: StdDuration,
    /// If true, the database schema is brought up to date when the server starts.
    pub auto_migrate: bool,
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_LE_HOST.to_string(),
            port: DEFAULT_LE_PORT,
            database_url: DEFAULT_LE_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            auto_migrate: true,
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("LE_HOST").ok().unwrap_or_else(|| DEFAULT_LE_HOST.into());
        let port = env::var("LE_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for LE_PORT. {e} Using the default, {DEFAULT_LE_PORT}, instead.");
                    DEFAULT_LE_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_LE_PORT);
        let database_url = env::var("LE_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ LE_DATABASE_URL is not set. Using the default, {DEFAULT_LE_DATABASE_URL}.");
            DEFAULT_LE_DATABASE_URL.to_string()
        });
        let max_connections = env::var("LE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| {
                s.parse::<u32>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for LE_MAX_CONNECTIONS. {e}"))
                    .ok()
                    .filter(|n| *n > 0)
            })
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let lock_timeout = env::var("LE_LOCK_TIMEOUT_MS")
            .map_err(|_| {
                info!(
                    "🪛️ LE_LOCK_TIMEOUT_MS is not set. Using the default value of {} ms.",
                    DEFAULT_LOCK_TIMEOUT.as_millis()
                )
            })
            .and_then(|s| {
                s.parse::<u64>()
                    .map(StdDuration::from_millis)
                    .map_err(|e| warn!("🪛️ Invalid configuration value for LE_LOCK_TIMEOUT_MS. {e}"))
            })
            .ok()
            .unwrap_or(DEFAULT_LOCK_TIMEOUT);
        let auto_migrate = parse_boolean_flag(env::var("LE_AUTO_MIGRATE").ok(), true);
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to the \
                 default configuration."
            );
            AuthConfig::default()
        });
        Self { host, port, database_url, max_connections, lock_timeout, auto_migrate, auth }
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The key used to sign and verify access tokens.
    pub token_secret: Secret<String>,
    /// How long an access token is valid for after it is issued.
    pub token_ttl: Duration,
    /// The bcrypt work factor for new password hashes.
    pub password_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The token signing secret has not been set. I'm using a random value for this session. Every \
             access token will be invalidated when the server restarts. DO NOT operate on production like this. 🚨️🚨️🚨️"
        );
        let mut key = [0u8; 32];
        thread_rng().fill_bytes(&mut key);
        let token_secret = Secret::new(base64::encode(key));
        Self { token_secret, token_ttl: DEFAULT_TOKEN_TTL, password_cost: bcrypt::DEFAULT_COST }
    }
}

impl AuthConfig {
    pub fn new<S: Into<String>>(secret: S, token_ttl: Duration) -> Self {
        Self { token_secret: Secret::new(secret.into()), token_ttl, password_cost: bcrypt::DEFAULT_COST }
    }

    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost.clamp(MIN_PASSWORD_COST, MAX_PASSWORD_COST);
        self
    }

    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret = env::var("LE_TOKEN_SECRET")
            .map_err(|e| ServerError::ConfigurationError(format!("{e} [LE_TOKEN_SECRET]")))?;
        if secret.len() < 16 {
            return Err(ServerError::ConfigurationError(
                "LE_TOKEN_SECRET must be at least 16 characters long".to_string(),
            ));
        }
        let token_ttl = match env::var("LE_TOKEN_TTL_HOURS") {
            Ok(s) => s.parse::<i64>().map(Duration::hours).map_err(|e| {
                ServerError::ConfigurationError(format!("Invalid value for LE_TOKEN_TTL_HOURS: {e}"))
            })?,
            Err(_) => {
                info!("🪛️ LE_TOKEN_TTL_HOURS is not set. Tokens will be valid for {} days.", DEFAULT_TOKEN_TTL.num_days());
                DEFAULT_TOKEN_TTL
            },
        };
        let password_cost = match env::var("LE_PASSWORD_COST") {
            Ok(s) => s
                .parse::<u32>()
                .ok()
                .filter(|c| (MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(c))
                .ok_or_else(|| {
                    ServerError::ConfigurationError(format!(
                        "LE_PASSWORD_COST must be a number from {MIN_PASSWORD_COST} to {MAX_PASSWORD_COST}, not {s}"
                    ))
                })?,
            Err(_) => bcrypt::DEFAULT_COST,
        };
        Ok(Self::new(secret, token_ttl).with_password_cost(password_cost))
    }
}
