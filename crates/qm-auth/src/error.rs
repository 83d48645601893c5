use qm_store::StoreError;

/// Errors from token verification and access checks.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error("no token provided")]
    MissingToken,

    #[error("malformed token")]
    Malformed,

    #[error("invalid token signature")]
    BadSignature,

    #[error("token expired")]
    Expired,

    #[error("token subject no longer exists")]
    UnknownUser,

    #[error("admin access required")]
    Forbidden,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;
