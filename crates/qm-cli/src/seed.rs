//! Demonstration dataset for local runs.
//!
//! Loads a small catalog, two accounts, and a few months of ledger traffic
//! through the real ledgers, so the seeded store obeys the same stock
//! bookkeeping as live traffic.

use std::sync::Arc;

use chrono::{Duration, Utc};
use qm_ledger::{IssueDraft, IssueLedger, IssueLine, LineOutcome, PurchaseDraft, PurchaseLedger, PurchaseLine};
use qm_store::InventoryStore;
use qm_types::{Item, Role, UnitType, User};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Populate `store` with the demonstration data. Returns the seeded
/// accounts so the caller can mint tokens for them.
pub fn load(store: Arc<dyn InventoryStore>) -> anyhow::Result<Vec<User>> {
    let admin = store.insert_user(User::new(
        "Priya Raman",
        "priya@quartermaster.local",
        Role::Admin,
    ))?;
    let worker = store.insert_user(User::new(
        "Noah Feldstein",
        "noah@quartermaster.local",
        Role::Standard,
    ))?;
    let worker = store.approve_user(&worker.id)?;

    let laptop = store.insert_item(Item::new(
        "Laptop",
        UnitType::Pieces,
        "Electronics",
        Some("14-inch developer laptop".to_string()),
    ))?;
    let cable = store.insert_item(Item::new("Cable Wire", UnitType::Meters, "Electrical", None))?;
    let paint = store.insert_item(Item::new("Wall Paint", UnitType::Liters, "Supplies", None))?;
    let steel = store.insert_item(Item::new("Steel Rods", UnitType::Kilograms, "Raw Material", None))?;

    let purchases = PurchaseLedger::new(store.clone());
    let issues = IssueLedger::new(store.clone());

    let batches = [
        PurchaseDraft {
            vendor: "Northside Supply Co".to_string(),
            bill_number: "B-1001".to_string(),
            po_number: "PO-58".to_string(),
            date: Some(Utc::now() - Duration::days(70)),
            lines: vec![
                purchase_line(&laptop, dec!(12), dec!(9600)),
                purchase_line(&cable, dec!(250), dec!(375)),
            ],
        },
        PurchaseDraft {
            vendor: "Brightline Traders".to_string(),
            bill_number: "B-1002".to_string(),
            po_number: String::new(),
            date: Some(Utc::now() - Duration::days(40)),
            lines: vec![
                purchase_line(&paint, dec!(60), dec!(540)),
                purchase_line(&steel, dec!(500), dec!(1250)),
            ],
        },
        PurchaseDraft {
            vendor: "Northside Supply Co".to_string(),
            bill_number: "B-1003".to_string(),
            po_number: "PO-61".to_string(),
            date: Some(Utc::now() - Duration::days(8)),
            lines: vec![purchase_line(&laptop, dec!(4), dec!(3300))],
        },
    ];
    for draft in &batches {
        all_recorded(&purchases.record(admin.id, draft)?)?;
    }

    let tickets = [
        IssueDraft {
            ticket: "TKT-2001".to_string(),
            date: Some(Utc::now() - Duration::days(30)),
            issued_by: admin.name.clone(),
            issued_to: Some(worker.id),
            lines: vec![issue_line(&laptop, dec!(3)), issue_line(&cable, dec!(40))],
        },
        IssueDraft {
            ticket: "TKT-2002".to_string(),
            date: Some(Utc::now() - Duration::days(5)),
            issued_by: admin.name.clone(),
            issued_to: Some(worker.id),
            lines: vec![issue_line(&paint, dec!(15))],
        },
    ];
    for draft in &tickets {
        all_recorded(&issues.issue(draft)?)?;
    }

    Ok(vec![admin, worker])
}

fn purchase_line(item: &Item, quantity: Decimal, amount: Decimal) -> PurchaseLine {
    PurchaseLine {
        item_id: Some(item.id),
        quantity: Some(quantity),
        unit_type: Some(item.unit_type),
        amount: Some(amount),
        tax_rate: None,
        serial_numbers: Vec::new(),
    }
}

fn issue_line(item: &Item, quantity: Decimal) -> IssueLine {
    IssueLine {
        item_id: Some(item.id),
        quantity: Some(quantity),
        serial_number: None,
        description: None,
    }
}

fn all_recorded<T>(outcomes: &[LineOutcome<T>]) -> anyhow::Result<()> {
    if let Some(reason) = outcomes.iter().find_map(|outcome| outcome.rejection_reason()) {
        anyhow::bail!("seed line rejected: {reason}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qm_ledger::StockAuditor;
    use qm_store::InMemoryInventory;

    fn seeded() -> (Arc<dyn InventoryStore>, Vec<User>) {
        let store: Arc<dyn InventoryStore> = Arc::new(InMemoryInventory::new());
        let accounts = load(store.clone()).unwrap();
        (store, accounts)
    }

    #[test]
    fn seeded_store_audits_clean() {
        let (store, _) = seeded();
        let report = StockAuditor::audit(store.as_ref()).unwrap();
        assert!(report.is_clean(), "violations: {:?}", report.violations);
        assert_eq!(report.items_checked, 4);
        assert_eq!(report.purchases_scanned, 5);
        assert_eq!(report.issues_scanned, 3);
    }

    #[test]
    fn seeded_accounts_cover_both_roles() {
        let (_, accounts) = seeded();
        assert_eq!(accounts.len(), 2);
        assert!(accounts[0].role.is_admin());
        assert!(!accounts[1].role.is_admin());
        assert!(accounts[1].is_approved);
    }

    #[test]
    fn seeded_stock_is_positive() {
        let (store, _) = seeded();
        for item in store.items().unwrap() {
            assert!(
                item.available_stock > Decimal::ZERO,
                "{} has no stock",
                item.name
            );
        }
    }

    #[test]
    fn loading_twice_fails_on_duplicate_emails() {
        let (store, _) = seeded();
        assert!(load(store).is_err());
    }
}
