use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use qm_types::{Issue, Item, ItemId, Purchase, PurchaseAmendment, PurchaseId, User, UserId};

use crate::error::{StoreError, StoreResult};
use crate::traits::{EntityCounts, InventoryStore, ItemUpdate};

/// In-memory inventory store for tests, local demos, and embedding.
///
/// All state lives behind a single `RwLock`, which is what makes the
/// record-purchase and record-issue operations atomic: the sufficiency
/// check, the ledger append, and the totals adjustment all happen under one
/// writer guard.
pub struct InMemoryInventory {
    inner: RwLock<InventoryState>,
}

#[derive(Default)]
struct InventoryState {
    items: HashMap<ItemId, Item>,
    users: HashMap<UserId, User>,
    purchases: Vec<Purchase>,
    purchase_index: HashMap<PurchaseId, usize>,
    issues: Vec<Issue>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(InventoryState::default()),
        }
    }

    fn state(&self) -> StoreResult<RwLockReadGuard<'_, InventoryState>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn state_mut(&self) -> StoreResult<RwLockWriteGuard<'_, InventoryState>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore for InMemoryInventory {
    fn insert_item(&self, item: Item) -> StoreResult<Item> {
        let mut state = self.state_mut()?;
        tracing::debug!(item = %item.id, name = %item.name, "catalog item added");
        state.items.insert(item.id, item.clone());
        Ok(item)
    }

    fn item(&self, id: &ItemId) -> StoreResult<Option<Item>> {
        Ok(self.state()?.items.get(id).cloned())
    }

    fn items(&self) -> StoreResult<Vec<Item>> {
        let state = self.state()?;
        let mut items: Vec<Item> = state.items.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    fn update_item(&self, id: &ItemId, update: ItemUpdate) -> StoreResult<Item> {
        let mut state = self.state_mut()?;
        let Some(item) = state.items.get_mut(id) else {
            return Err(StoreError::ItemNotFound(*id));
        };
        item.name = update.name;
        item.unit_type = update.unit_type;
        item.category = update.category;
        item.description = update.description;
        Ok(item.clone())
    }

    fn delete_item(&self, id: &ItemId) -> StoreResult<()> {
        let mut state = self.state_mut()?;
        if !state.items.contains_key(id) {
            return Err(StoreError::ItemNotFound(*id));
        }
        let referenced = state.purchases.iter().any(|p| p.item_id == *id)
            || state.issues.iter().any(|i| i.item_id == *id);
        if referenced {
            return Err(StoreError::ItemInUse(*id));
        }
        state.items.remove(id);
        tracing::debug!(item = %id, "catalog item deleted");
        Ok(())
    }

    fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut state = self.state_mut()?;
        let duplicate = state
            .users
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&user.email));
        if duplicate {
            return Err(StoreError::DuplicateEmail(user.email));
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn user(&self, id: &UserId) -> StoreResult<Option<User>> {
        Ok(self.state()?.users.get(id).cloned())
    }

    fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.state()?;
        Ok(state
            .users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn users(&self) -> StoreResult<Vec<User>> {
        let state = self.state()?;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    fn approve_user(&self, id: &UserId) -> StoreResult<User> {
        let mut state = self.state_mut()?;
        let Some(user) = state.users.get_mut(id) else {
            return Err(StoreError::UserNotFound(*id));
        };
        user.is_approved = true;
        tracing::info!(user = %id, "user approved");
        Ok(user.clone())
    }

    fn record_purchase(&self, purchase: Purchase) -> StoreResult<Purchase> {
        let mut state = self.state_mut()?;
        let Some(item) = state.items.get_mut(&purchase.item_id) else {
            return Err(StoreError::ItemNotFound(purchase.item_id));
        };
        item.total_purchased += purchase.quantity;
        item.available_stock += purchase.quantity;
        tracing::debug!(
            purchase = %purchase.id,
            item = %purchase.item_id,
            quantity = %purchase.quantity,
            "purchase recorded"
        );
        let slot = state.purchases.len();
        state.purchase_index.insert(purchase.id, slot);
        state.purchases.push(purchase.clone());
        Ok(purchase)
    }

    fn amend_purchase(
        &self,
        id: &PurchaseId,
        patch: &PurchaseAmendment,
    ) -> StoreResult<Purchase> {
        let mut state = self.state_mut()?;
        let Some(&slot) = state.purchase_index.get(id) else {
            return Err(StoreError::PurchaseNotFound(*id));
        };
        let purchase = &mut state.purchases[slot];
        patch.apply_to(purchase);
        Ok(purchase.clone())
    }

    fn purchase(&self, id: &PurchaseId) -> StoreResult<Option<Purchase>> {
        let state = self.state()?;
        Ok(state
            .purchase_index
            .get(id)
            .map(|&slot| state.purchases[slot].clone()))
    }

    fn purchases(&self) -> StoreResult<Vec<Purchase>> {
        Ok(self.state()?.purchases.clone())
    }

    fn record_issue(&self, issue: Issue) -> StoreResult<Issue> {
        let mut state = self.state_mut()?;
        let Some(item) = state.items.get_mut(&issue.item_id) else {
            return Err(StoreError::ItemNotFound(issue.item_id));
        };
        if item.available_stock < issue.quantity {
            return Err(StoreError::InsufficientStock {
                requested: issue.quantity,
                available: item.available_stock,
            });
        }
        item.total_issued += issue.quantity;
        item.available_stock -= issue.quantity;
        tracing::debug!(
            issue = %issue.id,
            item = %issue.item_id,
            quantity = %issue.quantity,
            "issue recorded"
        );
        state.issues.push(issue.clone());
        Ok(issue)
    }

    fn issues(&self) -> StoreResult<Vec<Issue>> {
        Ok(self.state()?.issues.clone())
    }

    fn issues_for(&self, recipient: &UserId) -> StoreResult<Vec<Issue>> {
        let state = self.state()?;
        Ok(state
            .issues
            .iter()
            .filter(|issue| issue.issued_to == *recipient)
            .cloned()
            .collect())
    }

    fn distinct_vendors(&self) -> StoreResult<Vec<String>> {
        let state = self.state()?;
        let vendors: BTreeSet<String> = state
            .purchases
            .iter()
            .filter(|p| !p.vendor.trim().is_empty())
            .map(|p| p.vendor.clone())
            .collect();
        Ok(vendors.into_iter().collect())
    }

    fn counts(&self) -> StoreResult<EntityCounts> {
        let state = self.state()?;
        Ok(EntityCounts {
            users: state.users.len(),
            items: state.items.len(),
            purchases: state.purchases.len(),
            issues: state.issues.len(),
        })
    }
}
