use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum TripLedgerError {
    /// Trip with given ID not found
    #[error("Trip {0} not found")]
    TripNotFound(String),

    /// User is not a member of the trip
    #[error("User {0} is not a trip member")]
    NotTripMember(String),

    /// Date is not part of the trip's scheduled dates
    #[error("Date {0} is not scheduled for this trip")]
    TripDateNotFound(String),

    /// Expense was submitted without any debtors
    #[error("Expense must have at least one debtor")]
    EmptyDebtors,

    /// Debtor shares do not add up to the expense amount
    #[error("Debtor shares sum to {actual} but expense amount is {expected}")]
    ShareSumMismatch { expected: f64, actual: f64 },

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    /// Net balances over the ledger do not sum to zero. Indicates a ledger
    /// invariant violation; not correctable by the caller.
    #[error("Ledger balances do not sum to zero (residual {residual})")]
    InconsistentLedger { residual: f64 },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    /// Internal server error (e.g., unexpected failure)
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}
