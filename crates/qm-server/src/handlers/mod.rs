//! Request handlers, grouped by resource.
//!
//! Every handler resolves its caller through the [`AppState`] guard
//! before touching the store; route paths decide nothing about access.

pub mod issues;
pub mod items;
pub mod meta;
pub mod purchases;
pub mod reports;
pub mod users;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use qm_auth::Credentials;
use qm_types::User;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::state::AppState;

/// Resolve the caller from the `Authorization` header.
pub(crate) async fn caller(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    Ok(state.guard.authenticate(&credentials(headers)).await?)
}

/// Resolve the caller and require the admin role.
pub(crate) async fn admin_caller(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    Ok(state.guard.require_admin(&credentials(headers)).await?)
}

fn credentials(headers: &HeaderMap) -> Credentials {
    Credentials::from_header(
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok()),
    )
}

/// Parse a JSON request body, reporting failures as 400s with the
/// standard error shape.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body)
        .map_err(|err| ApiError::validation(format!("invalid request body: {err}")))
}
