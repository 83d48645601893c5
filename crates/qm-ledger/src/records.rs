//! Batch inputs and per-line outcomes for the two ledgers.
//!
//! Draft types mirror the submitted JSON: header fields plus an `items`
//! array. Line fields are optional because a line with missing data is
//! rejected individually, never by failing the whole request.

use chrono::{DateTime, Utc};
use qm_types::{ItemId, UnitType, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchase batch as submitted: one vendor bill covering one or more
/// item lines.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDraft {
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub bill_number: String,
    #[serde(default)]
    pub po_number: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, rename = "items")]
    pub lines: Vec<PurchaseLine>,
}

/// One line of a purchase batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub unit_type: Option<UnitType>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    pub serial_numbers: Vec<String>,
}

/// An issue batch as submitted: one ticket moving stock to one recipient.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDraft {
    #[serde(default)]
    pub ticket: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub issued_by: String,
    #[serde(default)]
    pub issued_to: Option<UserId>,
    #[serde(default, rename = "items")]
    pub lines: Vec<IssueLine>,
}

/// One line of an issue batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLine {
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Outcome for one submitted line, reported in input order.
///
/// Serializes untagged: a recorded line becomes the created record, a
/// rejected line becomes `{"error": "<reason>"}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LineOutcome<T> {
    /// The line was persisted and the item's totals were adjusted.
    Recorded(T),
    /// The line was skipped; sibling lines are unaffected.
    Rejected {
        #[serde(rename = "error")]
        reason: String,
    },
}

impl<T> LineOutcome<T> {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }

    /// The persisted record, if the line was accepted.
    pub fn recorded(&self) -> Option<&T> {
        match self {
            Self::Recorded(record) => Some(record),
            Self::Rejected { .. } => None,
        }
    }

    /// The rejection reason, if the line was skipped.
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::Recorded(_) => None,
            Self::Rejected { reason } => Some(reason),
        }
    }
}
