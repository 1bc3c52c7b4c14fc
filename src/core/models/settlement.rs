use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A directed payment that moves one debtor's and one creditor's balance
/// toward zero. Derived from the ledger on every query, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transfer {
    pub from_user: String,
    pub to_user: String,
    pub amount: f64,
    pub currency: String,
}
