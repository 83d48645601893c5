use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use qm_store::ItemUpdate;
use qm_types::{Item, ItemId, UnitType};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::handlers::{admin_caller, parse_body};
use crate::state::AppState;

/// Fields accepted when creating or updating a catalog item.
///
/// The unit arrives as its wire code so a bad value reports as a
/// validation failure rather than a deserialization one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemPayload {
    #[serde(default)]
    name: String,
    #[serde(default)]
    unit_type: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: Option<String>,
}

impl ItemPayload {
    fn validated(self) -> Result<(String, UnitType, String, Option<String>), ApiError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::validation("missing required field: name"));
        }
        let Some(unit) = self.unit_type else {
            return Err(ApiError::validation("missing required field: unitType"));
        };
        let unit: UnitType = unit.parse()?;
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ApiError::validation("missing required field: category"));
        }
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);
        Ok((name.to_string(), unit, category.to_string(), description))
    }
}

/// `GET /api/admin/items`
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Item>>, ApiError> {
    admin_caller(&state, &headers).await?;
    Ok(Json(state.store.items()?))
}

/// `POST /api/admin/items`
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    admin_caller(&state, &headers).await?;
    let payload: ItemPayload = parse_body(&body)?;
    let (name, unit, category, description) = payload.validated()?;
    let item = state
        .store
        .insert_item(Item::new(name, unit, category, description))?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /api/admin/items/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<Item>, ApiError> {
    admin_caller(&state, &headers).await?;
    let id: ItemId = id.parse()?;
    let payload: ItemPayload = parse_body(&body)?;
    let (name, unit_type, category, description) = payload.validated()?;
    let item = state.store.update_item(
        &id,
        ItemUpdate {
            name,
            unit_type,
            category,
            description,
        },
    )?;
    Ok(Json(item))
}

/// `DELETE /api/admin/items/:id`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    admin_caller(&state, &headers).await?;
    let id: ItemId = id.parse()?;
    state.store.delete_item(&id)?;
    Ok(Json(json!({ "message": "Item deleted successfully" })))
}
