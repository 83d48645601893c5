use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use qm_ledger::{Page, PurchaseDraft, PurchaseHistoryQuery, PurchaseWithNames};
use qm_types::{Purchase, PurchaseAmendment, PurchaseId};
use serde_json::json;

use crate::error::ApiError;
use crate::handlers::{admin_caller, parse_body};
use crate::state::AppState;

/// `POST /api/admin/purchases`
///
/// Records a purchase batch. The response carries one result per input
/// line, in input order: the created record, or `{"error": reason}`.
pub async fn record(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let clerk = admin_caller(&state, &headers).await?;
    let draft: PurchaseDraft = parse_body(&body)?;
    let outcomes = state.purchases.record(clerk.id, &draft)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "results": outcomes })),
    ))
}

/// `GET /api/admin/purchases`
pub async fn listing(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<PurchaseWithNames>>, ApiError> {
    admin_caller(&state, &headers).await?;
    Ok(Json(state.query.purchase_listing()?))
}

/// `GET /api/admin/recent-purchases`
pub async fn recent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PurchaseHistoryQuery>,
) -> Result<Json<Page<Purchase>>, ApiError> {
    admin_caller(&state, &headers).await?;
    Ok(Json(state.query.purchase_history(&query)?))
}

/// `PATCH /api/admin/recent-purchases/:id`
pub async fn amend(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<Purchase>, ApiError> {
    admin_caller(&state, &headers).await?;
    let id: PurchaseId = id.parse()?;
    let patch: PurchaseAmendment = parse_body(&body)?;
    Ok(Json(state.purchases.amend(&id, &patch)?))
}

/// `GET /api/admin/vendors`
pub async fn vendors(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<String>>, ApiError> {
    admin_caller(&state, &headers).await?;
    Ok(Json(state.query.vendors()?))
}
