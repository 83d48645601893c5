use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use qm_auth::AuthError;
use qm_ledger::LedgerError;
use qm_store::StoreError;
use qm_types::TypeError;
use serde_json::json;
use thiserror::Error;

/// Errors from running the server itself (startup, config, I/O).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// A request failure, bucketed by HTTP status.
///
/// Every response body is `{"error": "<message>"}`. The `From` impls
/// encode where each domain error lands: auth failures at 401/403,
/// validation and body-reference failures at 400, path-id misses at
/// 404, and anything infrastructural at a message-free 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ItemNotFound(_)
            | StoreError::UserNotFound(_)
            | StoreError::PurchaseNotFound(_) => Self::NotFound(err.to_string()),
            StoreError::DuplicateEmail(_)
            | StoreError::InsufficientStock { .. }
            | StoreError::ItemInUse(_) => Self::Validation(err.to_string()),
            StoreError::LockPoisoned => {
                tracing::error!(%err, "store failure");
                Self::Internal
            }
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::MissingField(_)
            | LedgerError::EmptyBatch
            | LedgerError::RecipientNotFound(_)
            | LedgerError::RecipientNotApproved(_) => Self::Validation(err.to_string()),
            LedgerError::Store(inner) => inner.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken
            | AuthError::Malformed
            | AuthError::BadSignature
            | AuthError::Expired
            | AuthError::UnknownUser => Self::Unauthorized(err.to_string()),
            AuthError::Forbidden => Self::Forbidden(err.to_string()),
            AuthError::Store(inner) => inner.into(),
        }
    }
}

impl From<TypeError> for ApiError {
    fn from(err: TypeError) -> Self {
        Self::Validation(err.to_string())
    }
}
