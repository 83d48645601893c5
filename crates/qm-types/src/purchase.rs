use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{ItemId, PurchaseId, UserId};
use crate::unit::UnitType;

/// Tax rate applied when a purchase line does not carry one.
pub fn default_tax_rate() -> Decimal {
    Decimal::from(18)
}

/// One accepted purchase line, as persisted in the purchase ledger.
///
/// Purchases are append-only. The single exception is the administrative
/// amend path ([`PurchaseAmendment`]), which corrects clerical fields on the
/// record without replaying the item's stock totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: PurchaseId,
    pub item_id: ItemId,
    pub recorded_by: UserId,
    pub vendor: String,
    pub bill_number: String,
    pub po_number: String,
    pub date: DateTime<Utc>,
    pub quantity: Decimal,
    pub unit_type: UnitType,
    pub amount: Decimal,
    pub tax_rate: Decimal,
    pub serial_numbers: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Field-by-field correction for an existing purchase.
///
/// Absent fields are left untouched. Applying an amendment never adjusts the
/// item's running totals.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseAmendment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<UnitType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl PurchaseAmendment {
    /// Overwrite the provided fields on `purchase`, leaving the rest as-is.
    pub fn apply_to(&self, purchase: &mut Purchase) {
        if let Some(vendor) = &self.vendor {
            purchase.vendor = vendor.clone();
        }
        if let Some(bill_number) = &self.bill_number {
            purchase.bill_number = bill_number.clone();
        }
        if let Some(po_number) = &self.po_number {
            purchase.po_number = po_number.clone();
        }
        if let Some(quantity) = self.quantity {
            purchase.quantity = quantity;
        }
        if let Some(unit_type) = self.unit_type {
            purchase.unit_type = unit_type;
        }
        if let Some(amount) = self.amount {
            purchase.amount = amount;
        }
        if let Some(date) = self.date {
            purchase.date = date;
        }
    }
}
