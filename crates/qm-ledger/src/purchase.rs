use std::sync::Arc;

use chrono::{DateTime, Utc};
use qm_store::{InventoryStore, StoreError};
use qm_types::{default_tax_rate, Purchase, PurchaseAmendment, PurchaseId, UserId};
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::records::{LineOutcome, PurchaseDraft, PurchaseLine};

/// The intake side of the stock ledger.
///
/// Recording a batch validates the header once, then walks the lines in
/// input order. Each accepted line is persisted together with its serial
/// numbers and the item's totals in one atomic store step; each rejected
/// line is reported and skipped without disturbing its siblings.
#[derive(Clone)]
pub struct PurchaseLedger {
    store: Arc<dyn InventoryStore>,
}

impl PurchaseLedger {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Record a purchase batch on behalf of `clerk`.
    pub fn record(
        &self,
        clerk: UserId,
        draft: &PurchaseDraft,
    ) -> LedgerResult<Vec<LineOutcome<Purchase>>> {
        let date = validate_header(draft)?;

        let mut outcomes = Vec::with_capacity(draft.lines.len());
        for line in &draft.lines {
            let outcome = self.record_line(clerk, draft, date, line)?;
            if let Some(reason) = outcome.rejection_reason() {
                tracing::debug!(reason, "purchase line rejected");
            }
            outcomes.push(outcome);
        }

        let accepted = outcomes.iter().filter(|o| o.is_recorded()).count();
        tracing::info!(
            vendor = %draft.vendor,
            bill = %draft.bill_number,
            accepted,
            rejected = outcomes.len() - accepted,
            "purchase batch processed"
        );
        Ok(outcomes)
    }

    /// Correct clerical fields on a recorded purchase. Item totals are not
    /// replayed; callers amending quantities own the resulting drift.
    pub fn amend(&self, id: &PurchaseId, patch: &PurchaseAmendment) -> LedgerResult<Purchase> {
        let amended = self.store.amend_purchase(id, patch)?;
        tracing::info!(purchase = %id, "purchase amended");
        Ok(amended)
    }

    fn record_line(
        &self,
        clerk: UserId,
        draft: &PurchaseDraft,
        date: DateTime<Utc>,
        line: &PurchaseLine,
    ) -> LedgerResult<LineOutcome<Purchase>> {
        let Some(item_id) = line.item_id else {
            return Ok(LineOutcome::rejected("Missing itemId"));
        };
        let Some(quantity) = line.quantity else {
            return Ok(LineOutcome::rejected("Missing quantity"));
        };
        if quantity <= Decimal::ZERO {
            return Ok(LineOutcome::rejected("Quantity must be positive"));
        }
        let Some(unit_type) = line.unit_type else {
            return Ok(LineOutcome::rejected("Missing unitType"));
        };
        let Some(amount) = line.amount else {
            return Ok(LineOutcome::rejected("Missing amount"));
        };
        if amount < Decimal::ZERO {
            return Ok(LineOutcome::rejected("Amount must not be negative"));
        }
        if let Some(reason) = serial_problem(&line.serial_numbers) {
            return Ok(LineOutcome::rejected(reason));
        }

        let item = match self.store.item(&item_id)? {
            Some(item) => item,
            None => return Ok(LineOutcome::rejected(format!("Item not found: {item_id}"))),
        };
        if !unit_type.is_compatible_with(&item.unit_type) {
            return Ok(LineOutcome::rejected(format!(
                "Unit mismatch: {} is tracked in {}",
                item.name, item.unit_type
            )));
        }

        let purchase = Purchase {
            id: PurchaseId::new(),
            item_id,
            recorded_by: clerk,
            vendor: draft.vendor.clone(),
            bill_number: draft.bill_number.clone(),
            po_number: draft.po_number.clone(),
            date,
            quantity,
            unit_type,
            amount,
            tax_rate: line.tax_rate.unwrap_or_else(default_tax_rate),
            serial_numbers: line.serial_numbers.clone(),
            created_at: Utc::now(),
        };

        match self.store.record_purchase(purchase) {
            Ok(recorded) => Ok(LineOutcome::Recorded(recorded)),
            // The item can vanish between the lookup above and the store
            // step; that is still a per-line outcome, not a batch failure.
            Err(StoreError::ItemNotFound(id)) => {
                Ok(LineOutcome::rejected(format!("Item not found: {id}")))
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn validate_header(draft: &PurchaseDraft) -> LedgerResult<DateTime<Utc>> {
    if draft.vendor.trim().is_empty() {
        return Err(LedgerError::MissingField("vendor"));
    }
    if draft.bill_number.trim().is_empty() {
        return Err(LedgerError::MissingField("billNumber"));
    }
    let Some(date) = draft.date else {
        return Err(LedgerError::MissingField("date"));
    };
    if draft.lines.is_empty() {
        return Err(LedgerError::EmptyBatch);
    }
    Ok(date)
}

fn serial_problem(serials: &[String]) -> Option<String> {
    let mut seen = std::collections::HashSet::new();
    for serial in serials {
        if serial.trim().is_empty() {
            return Some("Blank serial number".to_string());
        }
        if !seen.insert(serial.as_str()) {
            return Some(format!("Duplicate serial number: {serial}"));
        }
    }
    None
}
