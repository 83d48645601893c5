use qm_store::StoreError;
use qm_types::UserId;

/// Errors produced by ledger operations.
///
/// Per-line problems (unknown item, insufficient stock, bad fields) are not
/// errors at this level; they become `Rejected` line outcomes so the rest of
/// the batch can proceed. An error here fails the whole request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("at least one line item is required")]
    EmptyBatch,

    #[error("recipient not found: {0}")]
    RecipientNotFound(UserId),

    #[error("recipient {0} is not approved to receive stock")]
    RecipientNotApproved(UserId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
