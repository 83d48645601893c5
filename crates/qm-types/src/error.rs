use thiserror::Error;

/// Errors produced by type parsing and construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid unit type: {0}")]
    InvalidUnit(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid id: {0}")]
    InvalidId(String),
}
