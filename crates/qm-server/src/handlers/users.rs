use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Json;
use qm_types::{User, UserId};
use serde_json::json;

use crate::error::ApiError;
use crate::handlers::{admin_caller, caller};
use crate::state::AppState;

/// `GET /api/auth/me`
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<User>, ApiError> {
    let user = caller(&state, &headers).await?;
    Ok(Json(user))
}

/// `GET /api/admin/users`
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<User>>, ApiError> {
    admin_caller(&state, &headers).await?;
    Ok(Json(state.store.users()?))
}

/// `PUT /api/admin/users/:id/approve`
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    admin_caller(&state, &headers).await?;
    let id: UserId = id.parse()?;
    state.store.approve_user(&id)?;
    Ok(Json(json!({ "message": "User approved successfully" })))
}
