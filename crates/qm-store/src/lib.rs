//! Persistence boundary for Quartermaster.
//!
//! Everything the rest of the system knows about storage is the
//! [`InventoryStore`] trait: catalog items with running stock totals, the
//! user directory, and the two append-only ledgers (purchases and issues).
//! The trait is where a relational backend would plug in; the crate ships
//! one implementation, [`InMemoryInventory`].
//!
//! # Design Rules
//!
//! 1. Ledger rows are append-only; `amend_purchase` is the single, narrow
//!    exception and never replays totals.
//! 2. Recording a purchase or issue adjusts the item's totals in the same
//!    atomic step as the append. No caller can observe one without the
//!    other.
//! 3. The sufficiency check for an issue happens inside that atomic step,
//!    so concurrent issues cannot both spend the same stock.
//! 4. Item totals only ever grow (`total_purchased`, `total_issued`);
//!    `available_stock` is their difference and never goes negative.

pub mod error;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryInventory;
pub use traits::{EntityCounts, InventoryStore, ItemUpdate};
