//! Foundation types for Quartermaster.
//!
//! This crate provides the identifiers, enumerations, and record types used
//! throughout the system. Every other `qm-` crate depends on `qm-types`.
//!
//! # Key Types
//!
//! - [`ItemId`] / [`UserId`] / [`PurchaseId`] / [`IssueId`] — UUID v7 entity ids
//! - [`UnitType`] — fixed unit-of-measure enumeration (`PCS`/`M`/`L`/`KG`)
//! - [`Item`] — catalog entry carrying the running stock totals
//! - [`Purchase`] — immutable intake ledger record with serial numbers
//! - [`Issue`] — immutable issue-out ledger record tied to a recipient
//! - [`User`] / [`Role`] — directory records the ledgers reference

pub mod error;
pub mod ids;
pub mod issue;
pub mod item;
pub mod purchase;
pub mod unit;
pub mod user;

pub use error::TypeError;
pub use ids::{IssueId, ItemId, PurchaseId, UserId};
pub use issue::Issue;
pub use item::Item;
pub use purchase::{default_tax_rate, Purchase, PurchaseAmendment};
pub use unit::UnitType;
pub use user::{Role, User};
