use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use qm_types::UserId;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Claims carried inside a bearer token.
///
/// `exp` of zero means the token never expires; minted tokens always
/// carry a deadline unless explicitly requested otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Identifier of the user this token was issued to.
    pub sub: UserId,
    /// Unix timestamp the token was issued at.
    #[serde(default)]
    pub iat: u64,
    /// Unix timestamp after which the token is rejected.
    #[serde(default)]
    pub exp: u64,
}

impl Claims {
    /// Builds claims for `subject` valid for `ttl_secs` seconds from now.
    /// A zero TTL produces a token without an expiry.
    pub fn for_subject(subject: UserId, ttl_secs: u64) -> Self {
        let now = current_unix_time();
        let exp = if ttl_secs == 0 { 0 } else { now + ttl_secs };
        Self {
            sub: subject,
            iat: now,
            exp,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

impl Header {
    fn hs256() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Signs and verifies compact bearer tokens with an HMAC-SHA256 tag.
///
/// Tokens are three base64url segments, `header.payload.signature`,
/// with the tag computed over the first two segments. Verification is
/// constant-time via [`Mac::verify_slice`].
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
}

impl TokenCodec {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Serializes and signs `claims` into a compact token string.
    pub fn sign(&self, claims: &Claims) -> AuthResult<String> {
        let header = serde_json::to_vec(&Header::hs256()).map_err(|_| AuthError::Malformed)?;
        let payload = serde_json::to_vec(claims).map_err(|_| AuthError::Malformed)?;
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let tag = mac.finalize().into_bytes();
        Ok(format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(tag)))
    }

    /// Checks the signature and expiry of `token` and returns its claims.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let parts: Vec<&str> = token.split('.').collect();
        let [header_b64, payload_b64, tag_b64] = parts.as_slice() else {
            return Err(AuthError::Malformed);
        };

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_b64)
            .map_err(|_| AuthError::Malformed)?;
        let header: Header =
            serde_json::from_slice(&header_bytes).map_err(|_| AuthError::Malformed)?;
        if header.alg != "HS256" {
            return Err(AuthError::Malformed);
        }

        let tag = URL_SAFE_NO_PAD
            .decode(tag_b64)
            .map_err(|_| AuthError::Malformed)?;
        let signing_input = format!("{header_b64}.{payload_b64}");
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&tag).map_err(|_| AuthError::BadSignature)?;

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AuthError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&payload_bytes).map_err(|_| AuthError::Malformed)?;

        if claims.exp > 0 && claims.exp < current_unix_time() {
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }

    /// Mints a fresh token for `subject`, valid for `ttl_secs` seconds.
    pub fn mint(&self, subject: UserId, ttl_secs: u64) -> AuthResult<String> {
        self.sign(&Claims::for_subject(subject, ttl_secs))
    }
}

fn current_unix_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
