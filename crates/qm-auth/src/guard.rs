use std::sync::Arc;

use async_trait::async_trait;
use qm_store::InventoryStore;
use qm_types::User;

use crate::error::{AuthError, AuthResult};
use crate::token::TokenCodec;

/// Credentials extracted from an incoming request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// A bearer token from the `Authorization` header.
    Bearer(String),
    /// No usable credentials were presented.
    Anonymous,
}

impl Credentials {
    /// Parses an `Authorization` header value. Anything other than a
    /// non-empty `Bearer` token counts as anonymous.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.and_then(|v| v.strip_prefix("Bearer ")) {
            Some(token) => {
                let token = token.trim();
                if token.is_empty() {
                    Credentials::Anonymous
                } else {
                    Credentials::Bearer(token.to_string())
                }
            }
            None => Credentials::Anonymous,
        }
    }
}

/// Resolves credentials to a stored user account.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verifies `credentials` and returns the account they belong to.
    async fn authenticate(&self, credentials: &Credentials) -> AuthResult<User>;

    /// Like [`authenticate`](Self::authenticate), but additionally
    /// requires the account to hold the admin role.
    async fn require_admin(&self, credentials: &Credentials) -> AuthResult<User> {
        let user = self.authenticate(credentials).await?;
        if user.role.is_admin() {
            Ok(user)
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

/// Token-backed [`AuthProvider`] over the inventory store.
///
/// A token is only as good as its subject: accounts deleted after a
/// token was minted fail with [`AuthError::UnknownUser`].
#[derive(Clone)]
pub struct AccessGuard {
    codec: TokenCodec,
    store: Arc<dyn InventoryStore>,
}

impl AccessGuard {
    pub fn new(codec: TokenCodec, store: Arc<dyn InventoryStore>) -> Self {
        Self { codec, store }
    }

    /// The codec this guard verifies tokens with.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }
}

#[async_trait]
impl AuthProvider for AccessGuard {
    async fn authenticate(&self, credentials: &Credentials) -> AuthResult<User> {
        let token = match credentials {
            Credentials::Bearer(token) => token,
            Credentials::Anonymous => return Err(AuthError::MissingToken),
        };
        let claims = self.codec.verify(token)?;
        let user = self
            .store
            .user(&claims.sub)?
            .ok_or(AuthError::UnknownUser)?;
        tracing::debug!(user = %user.email, role = %user.role, "authenticated");
        Ok(user)
    }
}
