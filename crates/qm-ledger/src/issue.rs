use std::sync::Arc;

use chrono::{DateTime, Utc};
use qm_store::{InventoryStore, StoreError};
use qm_types::{Issue, IssueId, User};
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::records::{IssueDraft, IssueLine, LineOutcome};

/// The outflow side of the stock ledger.
///
/// Lines are processed strictly in input order, and every accepted line
/// re-enters the store's atomic check-and-debit step. Two lines draining
/// the same item therefore see cumulative depletion, never a batch-start
/// snapshot, and a line that fails the sufficiency check leaves nothing
/// behind.
#[derive(Clone)]
pub struct IssueLedger {
    store: Arc<dyn InventoryStore>,
}

impl IssueLedger {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Issue a batch of stock to the recipient named in the draft.
    pub fn issue(&self, draft: &IssueDraft) -> LedgerResult<Vec<LineOutcome<Issue>>> {
        let (date, recipient) = self.validate_header(draft)?;

        let mut outcomes = Vec::with_capacity(draft.lines.len());
        for line in &draft.lines {
            let outcome = self.issue_line(draft, date, &recipient, line)?;
            if let Some(reason) = outcome.rejection_reason() {
                tracing::debug!(reason, "issue line rejected");
            }
            outcomes.push(outcome);
        }

        let accepted = outcomes.iter().filter(|o| o.is_recorded()).count();
        tracing::info!(
            ticket = %draft.ticket,
            recipient = %recipient.id,
            accepted,
            rejected = outcomes.len() - accepted,
            "issue batch processed"
        );
        Ok(outcomes)
    }

    fn validate_header(&self, draft: &IssueDraft) -> LedgerResult<(DateTime<Utc>, User)> {
        if draft.ticket.trim().is_empty() {
            return Err(LedgerError::MissingField("ticket"));
        }
        let Some(date) = draft.date else {
            return Err(LedgerError::MissingField("date"));
        };
        if draft.issued_by.trim().is_empty() {
            return Err(LedgerError::MissingField("issuedBy"));
        }
        let Some(recipient_id) = draft.issued_to else {
            return Err(LedgerError::MissingField("issuedTo"));
        };
        if draft.lines.is_empty() {
            return Err(LedgerError::EmptyBatch);
        }

        let recipient = self
            .store
            .user(&recipient_id)?
            .ok_or(LedgerError::RecipientNotFound(recipient_id))?;
        if !recipient.may_receive_issues() {
            return Err(LedgerError::RecipientNotApproved(recipient_id));
        }
        Ok((date, recipient))
    }

    fn issue_line(
        &self,
        draft: &IssueDraft,
        date: DateTime<Utc>,
        recipient: &User,
        line: &IssueLine,
    ) -> LedgerResult<LineOutcome<Issue>> {
        let Some(item_id) = line.item_id else {
            return Ok(LineOutcome::rejected("Missing itemId"));
        };
        let Some(quantity) = line.quantity else {
            return Ok(LineOutcome::rejected("Missing quantity"));
        };
        if quantity <= Decimal::ZERO {
            return Ok(LineOutcome::rejected("Quantity must be positive"));
        }

        // Name lookup only; the authoritative existence and sufficiency
        // checks happen inside the store's writer section.
        let item = match self.store.item(&item_id)? {
            Some(item) => item,
            None => return Ok(LineOutcome::rejected(format!("Item not found: {item_id}"))),
        };

        let issue = Issue {
            id: IssueId::new(),
            item_id,
            issued_to: recipient.id,
            quantity,
            date,
            ticket: draft.ticket.clone(),
            serial_number: line.serial_number.clone().unwrap_or_default(),
            description: line.description.clone().unwrap_or_default(),
            issued_by: draft.issued_by.clone(),
            created_at: Utc::now(),
        };

        match self.store.record_issue(issue) {
            Ok(recorded) => Ok(LineOutcome::Recorded(recorded)),
            Err(StoreError::ItemNotFound(id)) => {
                Ok(LineOutcome::rejected(format!("Item not found: {id}")))
            }
            Err(StoreError::InsufficientStock {
                requested,
                available,
            }) => {
                tracing::debug!(
                    item = %item.id,
                    %requested,
                    %available,
                    "issue line short on stock"
                );
                Ok(LineOutcome::rejected(format!(
                    "Insufficient stock for item: {}",
                    item.name
                )))
            }
            Err(err) => Err(err.into()),
        }
    }
}
