use qm_types::{ItemId, PurchaseId, UserId};
use rust_decimal::Decimal;

/// Errors from inventory store operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The referenced catalog item does not exist.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// The referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The referenced purchase record does not exist.
    #[error("purchase not found: {0}")]
    PurchaseNotFound(PurchaseId),

    /// A user with this email already exists.
    #[error("a user with email {0} already exists")]
    DuplicateEmail(String),

    /// An issue asked for more stock than the item currently has.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        requested: Decimal,
        available: Decimal,
    },

    /// The item is referenced by ledger entries and cannot be deleted.
    #[error("item {0} is referenced by ledger entries and cannot be deleted")]
    ItemInUse(ItemId),

    /// A previous writer panicked while holding the state lock.
    #[error("inventory state lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
