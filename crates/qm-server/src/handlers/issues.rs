use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use qm_ledger::{IssueDraft, IssueHistoryQuery, IssueWithNames};
use serde_json::json;

use crate::error::ApiError;
use crate::handlers::{admin_caller, caller, parse_body};
use crate::state::AppState;

/// `POST /api/admin/issue`
///
/// Issues a stock batch to one recipient. Lines are applied in input
/// order against live stock, so two lines draining the same item see
/// cumulative depletion. One result per line, in input order.
pub async fn record(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    admin_caller(&state, &headers).await?;
    let draft: IssueDraft = parse_body(&body)?;
    let outcomes = state.issues.issue(&draft)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "results": outcomes })),
    ))
}

/// `GET /api/admin/issue-history`
pub async fn history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<IssueHistoryQuery>,
) -> Result<Json<Vec<IssueWithNames>>, ApiError> {
    admin_caller(&state, &headers).await?;
    Ok(Json(state.query.issue_history(&query)?))
}

/// `GET /api/user/issued-items`
///
/// The caller's own issue records, newest first.
pub async fn issued_items(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<IssueWithNames>>, ApiError> {
    let user = caller(&state, &headers).await?;
    Ok(Json(state.query.issued_to_user(&user.id)?))
}
