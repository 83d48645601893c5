use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Json;
use chrono::Utc;
use qm_ledger::MonthlyPurchases;
use qm_types::Item;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::handlers::{admin_caller, caller};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StockSummaryQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// `GET /api/admin/reports/stock-summary`
pub async fn stock_summary(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StockSummaryQuery>,
) -> Result<Json<Vec<Item>>, ApiError> {
    admin_caller(&state, &headers).await?;
    Ok(Json(state.query.stock_summary(query.category.as_deref())?))
}

/// `GET /api/admin/dashboard/stats`
pub async fn dashboard_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    admin_caller(&state, &headers).await?;
    let counts = state.query.dashboard_counts()?;
    Ok(Json(json!({
        "userCount": counts.users,
        "itemCount": counts.items,
        "purchaseCount": counts.purchases,
        "issueCount": counts.issues,
    })))
}

/// `GET /api/dashboard/monthly-purchases`
///
/// Visible to any authenticated user, not only admins.
pub async fn monthly_purchases(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<MonthlyPurchases>>, ApiError> {
    caller(&state, &headers).await?;
    Ok(Json(state.query.monthly_purchases(Utc::now())?))
}
