use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How a debtor's share was derived. The stored `value` is always the
/// concrete amount owed; the share type only records its origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShareType {
    #[default]
    Equal,
    Percent,
    Amount,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Debtor {
    pub user_id: String,
    pub share_type: ShareType,
    /// Amount owed by this user. For equal splits this is the pre-computed
    /// per-head amount.
    pub value: f64,
}

/// One ledger entry. Append-only: expenses are never updated or deleted.
///
/// Invariant: the debtor values sum to `amount` within `SHARE_TOLERANCE`,
/// enforced before the expense is written.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: String,
    pub trip_id: String,
    pub payer_id: String,
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub debtors: Vec<Debtor>,
    pub created_at: DateTime<Utc>,
}
