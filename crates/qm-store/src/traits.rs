use qm_types::{Issue, Item, ItemId, Purchase, PurchaseAmendment, PurchaseId, User, UserId};
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// Replacement values for a catalog item's descriptive fields.
///
/// Stock totals are never part of an update; only the two ledger operations
/// move them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub name: String,
    pub unit_type: qm_types::UnitType,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Row counts for the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntityCounts {
    pub users: usize,
    pub items: usize,
    pub purchases: usize,
    pub issues: usize,
}

/// Storage boundary for the inventory system.
///
/// All implementations must satisfy these invariants:
/// - `record_purchase` and `record_issue` are atomic per call: the ledger
///   row is appended and the item's totals are adjusted in one step, or
///   nothing happens. There is no window in which another caller can observe
///   the row without the totals (or vice versa).
/// - `record_issue` performs its sufficiency check inside the same step, so
///   two concurrent issues can never both spend the same stock.
/// - Ledger rows are append-only. The only mutation is `amend_purchase`,
///   which rewrites clerical fields and deliberately leaves totals alone.
/// - Callers validate quantities (`> 0`) before recording; the store trusts
///   the sign and guards existence and sufficiency.
pub trait InventoryStore: Send + Sync {
    /// Add a new catalog item. Totals start at zero.
    fn insert_item(&self, item: Item) -> StoreResult<Item>;

    /// Fetch one item. Returns `Ok(None)` if it does not exist.
    fn item(&self, id: &ItemId) -> StoreResult<Option<Item>>;

    /// All catalog items, name ascending.
    fn items(&self) -> StoreResult<Vec<Item>>;

    /// Replace an item's descriptive fields, returning the updated item.
    fn update_item(&self, id: &ItemId, update: ItemUpdate) -> StoreResult<Item>;

    /// Remove an item. Fails with `ItemInUse` while any purchase or issue
    /// references it.
    fn delete_item(&self, id: &ItemId) -> StoreResult<()>;

    /// Add a user. Emails are unique (case-insensitive).
    fn insert_user(&self, user: User) -> StoreResult<User>;

    /// Fetch one user. Returns `Ok(None)` if they do not exist.
    fn user(&self, id: &UserId) -> StoreResult<Option<User>>;

    /// Fetch a user by email (case-insensitive).
    fn user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// All users, newest first.
    fn users(&self) -> StoreResult<Vec<User>>;

    /// Mark a user as approved, returning the updated record.
    fn approve_user(&self, id: &UserId) -> StoreResult<User>;

    /// Append a purchase and credit the item's `total_purchased` and
    /// `available_stock` by its quantity, atomically.
    fn record_purchase(&self, purchase: Purchase) -> StoreResult<Purchase>;

    /// Rewrite clerical fields on an existing purchase. Item totals are not
    /// replayed.
    fn amend_purchase(&self, id: &PurchaseId, patch: &PurchaseAmendment)
        -> StoreResult<Purchase>;

    /// Fetch one purchase. Returns `Ok(None)` if it does not exist.
    fn purchase(&self, id: &PurchaseId) -> StoreResult<Option<Purchase>>;

    /// All purchases, in insertion order.
    fn purchases(&self) -> StoreResult<Vec<Purchase>>;

    /// Check sufficiency, append an issue, debit `available_stock` and
    /// credit `total_issued` by its quantity, atomically.
    fn record_issue(&self, issue: Issue) -> StoreResult<Issue>;

    /// All issues, in insertion order.
    fn issues(&self) -> StoreResult<Vec<Issue>>;

    /// Issues addressed to one recipient, in insertion order.
    fn issues_for(&self, recipient: &UserId) -> StoreResult<Vec<Issue>>;

    /// Distinct non-empty vendor names across all purchases, ascending.
    fn distinct_vendors(&self) -> StoreResult<Vec<String>>;

    /// Row counts for the dashboard.
    fn counts(&self) -> StoreResult<EntityCounts>;
}
