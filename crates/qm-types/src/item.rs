use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::ItemId;
use crate::unit::UnitType;

/// A catalog item and its running stock totals.
///
/// The totals are a projection of the two ledgers: `total_purchased` is the
/// sum of all purchase-line quantities, `total_issued` the sum of all issue
/// quantities, and `available_stock` their difference. They are maintained
/// incrementally by the store and never recomputed from scratch on the hot
/// path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub unit_type: UnitType,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub total_purchased: Decimal,
    pub total_issued: Decimal,
    pub available_stock: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Create a catalog entry with zeroed stock totals.
    pub fn new(
        name: impl Into<String>,
        unit_type: UnitType,
        category: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            unit_type,
            category: category.into(),
            description,
            total_purchased: Decimal::ZERO,
            total_issued: Decimal::ZERO,
            available_stock: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    /// The stock identity: `available == purchased - issued`.
    pub fn stock_consistent(&self) -> bool {
        self.available_stock == self.total_purchased - self.total_issued
    }

    /// Whether `quantity` can currently be issued from this item.
    pub fn can_issue(&self, quantity: Decimal) -> bool {
        quantity <= self.available_stock
    }
}
