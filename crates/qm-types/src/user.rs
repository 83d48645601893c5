use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::ids::UserId;

/// Access role of a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full access: catalog management, ledger mutations, reports.
    #[serde(rename = "ADMIN")]
    Admin,
    /// Read access to the user's own issued items.
    #[serde(rename = "USER")]
    Standard,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl FromStr for Role {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::Standard),
            other => Err(TypeError::InvalidRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::Standard => write!(f, "USER"),
        }
    }
}

/// A user in the directory.
///
/// Users are foreign-key targets for the ledgers: purchases record the
/// clerk who booked them, issues record the recipient. Standard users must
/// be approved before they may receive issues.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_approved: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// Create a new user record. Admins are approved implicitly.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            role,
            is_approved: role.is_admin(),
            created_at: chrono::Utc::now(),
        }
    }

    /// Whether this user may receive issued stock.
    pub fn may_receive_issues(&self) -> bool {
        self.is_approved
    }
}
