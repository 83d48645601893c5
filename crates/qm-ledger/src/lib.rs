//! Stock ledgers and read models for Quartermaster.
//!
//! This crate is the heart of the system. It provides:
//! - `PurchaseLedger` — validates and records purchase batches, crediting
//!   item totals per accepted line
//! - `IssueLedger` — validates and records issue batches, debiting stock
//!   after a per-line sufficiency check
//! - `QueryService` — filtered, sorted, paginated read models over the
//!   committed state
//! - `StockAuditor` — cross-checks item totals against the ledger sums
//!
//! Batch semantics are per-line: one tagged [`LineOutcome`] per submitted
//! line, in input order. A bad line never aborts its siblings, and an
//! accepted line's row, serial numbers, and totals land atomically.

pub mod audit;
pub mod error;
pub mod issue;
pub mod purchase;
pub mod query;
pub mod records;

pub use audit::{StockAuditReport, StockAuditor, StockViolation, ViolationKind};
pub use error::{LedgerError, LedgerResult};
pub use issue::IssueLedger;
pub use purchase::PurchaseLedger;
pub use query::{
    IssueHistoryQuery, IssueWithNames, ItemBrief, MonthlyPurchases, Page, Pagination,
    PurchaseHistoryQuery, PurchaseWithNames, QueryService, SortField, SortOrder, UserBrief,
};
pub use records::{IssueDraft, IssueLine, LineOutcome, PurchaseDraft, PurchaseLine};
