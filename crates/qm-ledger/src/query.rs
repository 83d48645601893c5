use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use qm_store::{EntityCounts, InventoryStore, StoreError};
use qm_types::{Issue, Item, ItemId, Purchase, UnitType, User, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerResult;

/// Sort key for the purchase history listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Date,
    Vendor,
    Amount,
}

/// Sort direction for the purchase history listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter, sort, and pagination parameters for the purchase history.
///
/// Doubles as the query-string shape of the history endpoint. The month
/// bounds use `YYYY-MM` and only apply when both are present and parse.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseHistoryQuery {
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub start_month: Option<String>,
    #[serde(default)]
    pub end_month: Option<String>,
    #[serde(default)]
    pub sort_field: Option<SortField>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Optional bounds for the issue history listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueHistoryQuery {
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// One page of results plus the bookkeeping to render a pager.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: usize,
}

/// Referenced item fields joined onto a ledger row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBrief {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<UnitType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Referenced user fields joined onto a ledger row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserBrief {
    pub name: String,
}

/// A purchase decorated with the names behind its foreign keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseWithNames {
    #[serde(flatten)]
    pub purchase: Purchase,
    pub item: ItemBrief,
    pub user: UserBrief,
}

/// An issue decorated with the names behind its foreign keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IssueWithNames {
    #[serde(flatten)]
    pub issue: Issue,
    pub item: ItemBrief,
    pub user: UserBrief,
}

/// Aggregates for one calendar month of purchasing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPurchases {
    /// Display label, e.g. `Aug 2026`.
    pub month: String,
    pub total_amount: Decimal,
    pub total_items: Decimal,
    pub unique_items: usize,
    pub purchases: usize,
}

/// Read-only views over the committed store state.
///
/// Every method reflects the latest committed writes; re-reading without an
/// intervening write yields identical results.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn InventoryStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Items with their current totals, name ascending, optionally narrowed
    /// to one category.
    pub fn stock_summary(&self, category: Option<&str>) -> LedgerResult<Vec<Item>> {
        let mut items = self.store.items()?;
        if let Some(category) = category {
            items.retain(|item| item.category == category);
        }
        Ok(items)
    }

    /// Filtered, sorted, paginated purchase history.
    pub fn purchase_history(&self, query: &PurchaseHistoryQuery) -> LedgerResult<Page<Purchase>> {
        let mut purchases = self.store.purchases()?;

        if let Some(vendor) = query.vendor.as_deref() {
            let needle = vendor.trim().to_lowercase();
            if !needle.is_empty() {
                purchases.retain(|p| p.vendor.to_lowercase().contains(&needle));
            }
        }

        if let (Some(start), Some(end)) = (
            query.start_month.as_deref(),
            query.end_month.as_deref(),
        ) {
            if let Some((from, until)) = month_range(start, end) {
                purchases.retain(|p| p.date >= from && p.date < until);
            }
        }

        let field = query.sort_field.unwrap_or_default();
        let order = query.sort_order.unwrap_or_default();
        purchases.sort_by(|a, b| {
            let ordering = match field {
                SortField::Date => a.date.cmp(&b.date),
                SortField::Vendor => a.vendor.cmp(&b.vendor),
                SortField::Amount => a.amount.cmp(&b.amount),
            };
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).max(1);
        let total = purchases.len();
        let total_pages = total.div_ceil(limit as usize);
        let skip = (page as usize - 1) * limit as usize;
        let data: Vec<Purchase> = purchases
            .into_iter()
            .skip(skip)
            .take(limit as usize)
            .collect();

        Ok(Page {
            data,
            pagination: Pagination {
                total,
                page,
                limit,
                total_pages,
            },
        })
    }

    /// The full purchase listing, newest first, with item and recorder
    /// names joined on.
    pub fn purchase_listing(&self) -> LedgerResult<Vec<PurchaseWithNames>> {
        let items = self.item_map()?;
        let users = self.user_map()?;

        let mut purchases = self.store.purchases()?;
        purchases.sort_by(|a, b| b.date.cmp(&a.date));

        purchases
            .into_iter()
            .map(|purchase| {
                let item = lookup_item(&items, &purchase.item_id)?;
                let user = lookup_user(&users, &purchase.recorded_by)?;
                Ok(PurchaseWithNames {
                    purchase,
                    item: ItemBrief {
                        name: item.name.clone(),
                        unit_type: None,
                        description: None,
                    },
                    user: UserBrief {
                        name: user.name.clone(),
                    },
                })
            })
            .collect()
    }

    /// Issue history, newest first, with item and recipient names joined
    /// on, optionally bounded by date and capped.
    pub fn issue_history(&self, query: &IssueHistoryQuery) -> LedgerResult<Vec<IssueWithNames>> {
        let items = self.item_map()?;
        let users = self.user_map()?;

        let mut issues = self.store.issues()?;
        if let Some(start) = query.start_date {
            issues.retain(|i| i.date >= start);
        }
        if let Some(end) = query.end_date {
            issues.retain(|i| i.date <= end);
        }
        issues.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(limit) = query.limit {
            issues.truncate(limit as usize);
        }

        issues
            .into_iter()
            .map(|issue| decorate_issue(issue, &items, &users))
            .collect()
    }

    /// Issues addressed to one recipient, newest first, with item details
    /// joined on.
    pub fn issued_to_user(&self, recipient: &UserId) -> LedgerResult<Vec<IssueWithNames>> {
        let items = self.item_map()?;
        let users = self.user_map()?;

        let mut issues = self.store.issues_for(recipient)?;
        issues.sort_by(|a, b| b.date.cmp(&a.date));

        issues
            .into_iter()
            .map(|issue| decorate_issue(issue, &items, &users))
            .collect()
    }

    /// Distinct non-empty vendor names, ascending.
    pub fn vendors(&self) -> LedgerResult<Vec<String>> {
        Ok(self.store.distinct_vendors()?)
    }

    /// Entity counts for the dashboard.
    pub fn dashboard_counts(&self) -> LedgerResult<EntityCounts> {
        Ok(self.store.counts()?)
    }

    /// Per-month purchase aggregates for the six months ending at `now`'s
    /// month, oldest first.
    pub fn monthly_purchases(&self, now: DateTime<Utc>) -> LedgerResult<Vec<MonthlyPurchases>> {
        let purchases = self.store.purchases()?;
        let mut summaries = Vec::with_capacity(6);

        for months_back in (0..6).rev() {
            let (year, month) = shifted_month(now.year(), now.month(), -months_back);
            let start = month_start(year, month);
            let (next_year, next_month) = shifted_month(year, month, 1);
            let end = month_start(next_year, next_month);

            let in_month: Vec<&Purchase> = purchases
                .iter()
                .filter(|p| p.date >= start && p.date < end)
                .collect();

            let total_amount = in_month.iter().map(|p| p.amount).sum();
            let total_items = in_month.iter().map(|p| p.quantity).sum();
            let unique_items = in_month
                .iter()
                .map(|p| p.item_id)
                .collect::<HashSet<ItemId>>()
                .len();

            summaries.push(MonthlyPurchases {
                month: start.format("%b %Y").to_string(),
                total_amount,
                total_items,
                unique_items,
                purchases: in_month.len(),
            });
        }

        Ok(summaries)
    }

    fn item_map(&self) -> LedgerResult<HashMap<ItemId, Item>> {
        Ok(self
            .store
            .items()?
            .into_iter()
            .map(|item| (item.id, item))
            .collect())
    }

    fn user_map(&self) -> LedgerResult<HashMap<UserId, User>> {
        Ok(self
            .store
            .users()?
            .into_iter()
            .map(|user| (user.id, user))
            .collect())
    }
}

fn decorate_issue(
    issue: Issue,
    items: &HashMap<ItemId, Item>,
    users: &HashMap<UserId, User>,
) -> LedgerResult<IssueWithNames> {
    let item = lookup_item(items, &issue.item_id)?;
    let user = lookup_user(users, &issue.issued_to)?;
    Ok(IssueWithNames {
        item: ItemBrief {
            name: item.name.clone(),
            unit_type: Some(item.unit_type),
            description: item.description.clone(),
        },
        user: UserBrief {
            name: user.name.clone(),
        },
        issue,
    })
}

fn lookup_item<'a>(
    items: &'a HashMap<ItemId, Item>,
    id: &ItemId,
) -> Result<&'a Item, StoreError> {
    items.get(id).ok_or(StoreError::ItemNotFound(*id))
}

fn lookup_user<'a>(
    users: &'a HashMap<UserId, User>,
    id: &UserId,
) -> Result<&'a User, StoreError> {
    users.get(id).ok_or(StoreError::UserNotFound(*id))
}

/// Both bounds must parse as `YYYY-MM`; the range covers the whole end
/// month.
fn month_range(start: &str, end: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let from = parse_month(start)?;
    let until = parse_month(end)?;
    let (next_year, next_month) = shifted_month(until.year(), until.month(), 1);
    Some((from, month_start(next_year, next_month)))
}

fn parse_month(ym: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(&format!("{ym}-01"), "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

fn shifted_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u32)
}

fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("first day of a month is a valid date")
        .and_utc()
}
