use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{IssueId, ItemId, UserId};

/// One accepted issue line, as persisted in the issue ledger.
///
/// An issue moves stock out of the catalog to a recipient. Records are
/// append-only; the sufficiency check that admitted the line happened inside
/// the store's writer section, so a persisted Issue is proof the stock was
/// there when it was taken.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: IssueId,
    pub item_id: ItemId,
    pub issued_to: UserId,
    pub quantity: Decimal,
    pub date: DateTime<Utc>,
    pub ticket: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub description: String,
    pub issued_by: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_issue() -> Issue {
        Issue {
            id: IssueId::new(),
            item_id: ItemId::new(),
            issued_to: UserId::new(),
            quantity: dec!(4),
            date: Utc::now(),
            ticket: "TKT-77".to_string(),
            serial_number: String::new(),
            description: "site office".to_string(),
            issued_by: "Ada Admin".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn serde_wire_shape_is_camel_case() {
        let json = serde_json::to_string(&sample_issue()).unwrap();
        assert!(json.contains("\"issuedTo\""));
        assert!(json.contains("\"ticket\":\"TKT-77\""));
        assert!(json.contains("\"issuedBy\":\"Ada Admin\""));
    }

    #[test]
    fn optional_strings_default_to_empty() {
        let json = r#"{
            "id": "018f6f38-0000-7000-8000-000000000001",
            "itemId": "018f6f38-0000-7000-8000-000000000002",
            "issuedTo": "018f6f38-0000-7000-8000-000000000003",
            "quantity": 2,
            "date": "2026-08-01T00:00:00Z",
            "ticket": "TKT-1",
            "issuedBy": "Ada Admin",
            "createdAt": "2026-08-01T00:00:00Z"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.serial_number, "");
        assert_eq!(issue.description, "");
        assert_eq!(issue.quantity, dec!(2));
    }
}
