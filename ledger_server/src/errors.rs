use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use ledger_engine::LedgerError;
use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("{0}")]
    Ledger(#[from] LedgerError),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(e) => match e {
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::ValidationError(_) => StatusCode::UNAUTHORIZED,
                AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
                AuthError::PoorlyFormattedToken(_) => StatusCode::UNAUTHORIZED,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::CouldNotIssueToken(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AuthError::CouldNotHashPassword(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Ledger(e) => match e {
                LedgerError::AccountNotFound(_) |
                LedgerError::SenderNotFound(_) |
                LedgerError::ReceiverNotFound(_) |
                LedgerError::ItemNotFound(_) |
                LedgerError::InsufficientFunds { .. } => StatusCode::BAD_REQUEST,
                LedgerError::Busy(_) | LedgerError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                LedgerError::InvariantViolation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Internal details stay in the logs
        let message = match self {
            Self::Ledger(LedgerError::InvariantViolation(_)) => {
                error!("💻️ {self}");
                "Internal server error".to_string()
            },
            _ if status.is_server_error() => {
                error!("💻️ {self}");
                self.to_string()
            },
            _ => self.to_string(),
        };
        HttpResponse::build(status)
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "errors": message }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No access token was provided.")]
    MissingToken,
    #[error("Access token signature is invalid. {0}")]
    ValidationError(String),
    #[error("Access token has expired.")]
    TokenExpired,
    #[error("Access token is not in the correct format. {0}")]
    PoorlyFormattedToken(String),
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("Could not issue an access token. {0}")]
    CouldNotIssueToken(String),
    #[error("Could not hash the password. {0}")]
    CouldNotHashPassword(String),
}
