//! Bearer-token authentication for Quartermaster.
//!
//! Tokens are compact HMAC-SHA256 signed claims ([`TokenCodec`]); the
//! [`AccessGuard`] resolves a verified token to the account it was
//! minted for and enforces role checks. Handlers talk to the
//! [`AuthProvider`] trait so tests can swap in canned identities.

pub mod error;
pub mod guard;
pub mod token;

pub use error::{AuthError, AuthResult};
pub use guard::{AccessGuard, AuthProvider, Credentials};
pub use token::{Claims, TokenCodec};
