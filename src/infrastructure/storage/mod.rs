use crate::core::errors::TripLedgerError;
use crate::core::models::{
    AvailabilityStatus, Expense, Trip, TripAudit, TripDate, TripMember,
};
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_trip(&self, trip: Trip) -> Result<(), TripLedgerError>;
    async fn get_trip(&self, trip_id: &str) -> Result<Option<Trip>, TripLedgerError>;

    async fn add_member(&self, member: TripMember) -> Result<(), TripLedgerError>;
    async fn get_member(
        &self,
        trip_id: &str,
        user_id: &str,
    ) -> Result<Option<TripMember>, TripLedgerError>;
    async fn list_members(&self, trip_id: &str) -> Result<Vec<TripMember>, TripLedgerError>;

    /// Append one expense to the trip's ledger. Appends for the same trip
    /// must be serialized by the implementation so insertion order is
    /// well-defined.
    async fn append_expense(&self, expense: Expense) -> Result<(), TripLedgerError>;
    /// All expenses for the trip, in insertion order.
    async fn list_expenses(&self, trip_id: &str) -> Result<Vec<Expense>, TripLedgerError>;

    async fn save_trip_date(&self, trip_date: TripDate) -> Result<(), TripLedgerError>;
    async fn get_trip_date(
        &self,
        trip_id: &str,
        date: NaiveDate,
    ) -> Result<Option<TripDate>, TripLedgerError>;
    async fn list_trip_dates(&self, trip_id: &str) -> Result<Vec<TripDate>, TripLedgerError>;

    async fn set_availability(
        &self,
        trip_date_id: &str,
        user_id: &str,
        status: AvailabilityStatus,
    ) -> Result<(), TripLedgerError>;
    /// `None` means the user never set a status for this date; callers treat
    /// that as `unset`.
    async fn get_availability(
        &self,
        trip_date_id: &str,
        user_id: &str,
    ) -> Result<Option<AvailabilityStatus>, TripLedgerError>;

    async fn save_trip_audit(&self, audit: TripAudit) -> Result<(), TripLedgerError>;
    async fn get_trip_audits(&self, trip_id: &str) -> Result<Vec<TripAudit>, TripLedgerError>;
}

pub mod in_memory;
