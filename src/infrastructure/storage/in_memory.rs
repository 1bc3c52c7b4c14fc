use crate::core::errors::TripLedgerError;
use crate::core::models::{
    AvailabilityStatus, Expense, Trip, TripAudit, TripDate, TripMember,
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::Mutex;

pub struct InMemoryStorage {
    trips: Mutex<HashMap<String, Trip>>,
    members: Mutex<HashMap<String, Vec<TripMember>>>, // trip_id -> members
    // trip_id -> expenses in insertion order; the single lock serializes
    // appends for the same trip
    expenses: Mutex<HashMap<String, Vec<Expense>>>,
    trip_dates: Mutex<HashMap<String, Vec<TripDate>>>, // trip_id -> dates
    availability: Mutex<HashMap<String, HashMap<String, AvailabilityStatus>>>, // date_id -> user -> status
    trip_audits: Mutex<HashMap<String, Vec<TripAudit>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            trips: Mutex::new(HashMap::new()),
            members: Mutex::new(HashMap::new()),
            expenses: Mutex::new(HashMap::new()),
            trip_dates: Mutex::new(HashMap::new()),
            availability: Mutex::new(HashMap::new()),
            trip_audits: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_trip(&self, trip: Trip) -> Result<(), TripLedgerError> {
        self.trips.lock().await.insert(trip.id.clone(), trip);
        Ok(())
    }

    async fn get_trip(&self, trip_id: &str) -> Result<Option<Trip>, TripLedgerError> {
        Ok(self.trips.lock().await.get(trip_id).cloned())
    }

    async fn add_member(&self, member: TripMember) -> Result<(), TripLedgerError> {
        self.members
            .lock()
            .await
            .entry(member.trip_id.clone())
            .or_default()
            .push(member);
        Ok(())
    }

    async fn get_member(
        &self,
        trip_id: &str,
        user_id: &str,
    ) -> Result<Option<TripMember>, TripLedgerError> {
        Ok(self
            .members
            .lock()
            .await
            .get(trip_id)
            .and_then(|members| members.iter().find(|m| m.user_id == user_id).cloned()))
    }

    async fn list_members(&self, trip_id: &str) -> Result<Vec<TripMember>, TripLedgerError> {
        Ok(self
            .members
            .lock()
            .await
            .get(trip_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn append_expense(&self, expense: Expense) -> Result<(), TripLedgerError> {
        self.expenses
            .lock()
            .await
            .entry(expense.trip_id.clone())
            .or_default()
            .push(expense);
        Ok(())
    }

    async fn list_expenses(&self, trip_id: &str) -> Result<Vec<Expense>, TripLedgerError> {
        Ok(self
            .expenses
            .lock()
            .await
            .get(trip_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_trip_date(&self, trip_date: TripDate) -> Result<(), TripLedgerError> {
        self.trip_dates
            .lock()
            .await
            .entry(trip_date.trip_id.clone())
            .or_default()
            .push(trip_date);
        Ok(())
    }

    async fn get_trip_date(
        &self,
        trip_id: &str,
        date: NaiveDate,
    ) -> Result<Option<TripDate>, TripLedgerError> {
        Ok(self
            .trip_dates
            .lock()
            .await
            .get(trip_id)
            .and_then(|dates| dates.iter().find(|d| d.date == date).cloned()))
    }

    async fn list_trip_dates(&self, trip_id: &str) -> Result<Vec<TripDate>, TripLedgerError> {
        Ok(self
            .trip_dates
            .lock()
            .await
            .get(trip_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_availability(
        &self,
        trip_date_id: &str,
        user_id: &str,
        status: AvailabilityStatus,
    ) -> Result<(), TripLedgerError> {
        self.availability
            .lock()
            .await
            .entry(trip_date_id.to_string())
            .or_default()
            .insert(user_id.to_string(), status);
        Ok(())
    }

    async fn get_availability(
        &self,
        trip_date_id: &str,
        user_id: &str,
    ) -> Result<Option<AvailabilityStatus>, TripLedgerError> {
        Ok(self
            .availability
            .lock()
            .await
            .get(trip_date_id)
            .and_then(|rows| rows.get(user_id).copied()))
    }

    async fn save_trip_audit(&self, audit: TripAudit) -> Result<(), TripLedgerError> {
        self.trip_audits
            .lock()
            .await
            .entry(audit.trip_id.clone())
            .or_default()
            .push(audit);
        Ok(())
    }

    async fn get_trip_audits(&self, trip_id: &str) -> Result<Vec<TripAudit>, TripLedgerError> {
        Ok(self
            .trip_audits
            .lock()
            .await
            .get(trip_id)
            .cloned()
            .unwrap_or_default())
    }
}
