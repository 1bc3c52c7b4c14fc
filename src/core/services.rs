use crate::constants::{
    AVAILABILITY_SET, DATES_ADDED, EXPENSE_ADDED, MAX_AMOUNT, MAX_CURRENCY_LENGTH,
    MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MAX_TITLE_LENGTH, MEMBER_JOINED,
    SETTLEMENTS_QUERIED, SHARE_TOLERANCE, TRIP_CREATED,
};
use crate::core::errors::{FieldError, TripLedgerError};
use crate::core::models::{
    AppLog, AvailabilityStatus, Debtor, Expense, Transfer, Trip, TripAudit, TripCalendar,
    TripDate, TripMember, UserAvailability,
};
use crate::core::settlement;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::{Datelike, NaiveDate, Utc};
use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct TripLedgerService<L: LoggingService, S: Storage> {
    storage: S,
    logging: L,
}

impl<L: LoggingService, S: Storage> TripLedgerService<L, S> {
    pub fn new(storage: S, logging: L) -> Self {
        TripLedgerService { storage, logging }
    }

    // VALIDATION HELPERS

    async fn validate_trip(&self, trip_id: &str) -> Result<Trip, TripLedgerError> {
        self.storage
            .get_trip(trip_id)
            .await?
            .ok_or_else(|| TripLedgerError::TripNotFound(trip_id.to_string()))
    }

    async fn validate_membership(
        &self,
        trip_id: &str,
        user_id: &str,
    ) -> Result<TripMember, TripLedgerError> {
        self.storage
            .get_member(trip_id, user_id)
            .await?
            .ok_or_else(|| TripLedgerError::NotTripMember(user_id.to_string()))
    }

    fn validate_string_input(
        &self,
        field: &str,
        value: &str,
        max_length: usize,
    ) -> Result<(), TripLedgerError> {
        if value.trim().is_empty() {
            return Err(TripLedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.len() > max_length {
            return Err(TripLedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), TripLedgerError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(TripLedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be a positive finite number".to_string(),
                },
            ));
        }
        if amount > MAX_AMOUNT {
            return Err(TripLedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Amount Too Large".to_string(),
                    description: format!("Amount cannot exceed {}", MAX_AMOUNT),
                },
            ));
        }
        Ok(())
    }

    async fn log_and_audit(
        &self,
        trip_id: Option<&str>,
        action: &str,
        details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), TripLedgerError> {
        self.logging
            .log_action(action, details.clone(), user_id)
            .await?;
        if let Some(tid) = trip_id {
            self.storage
                .save_trip_audit(TripAudit {
                    id: Uuid::new_v4().to_string(),
                    trip_id: tid.to_string(),
                    action: action.to_string(),
                    user_id: user_id.map(String::from),
                    details,
                    timestamp: Utc::now(),
                })
                .await?;
        }
        Ok(())
    }

    // TRIPS & MEMBERSHIP

    pub async fn create_trip(
        &self,
        title: String,
        description: Option<String>,
    ) -> Result<Trip, TripLedgerError> {
        self.validate_string_input("title", &title, MAX_TITLE_LENGTH)?;

        let trip = Trip {
            id: generate_trip_id(),
            title,
            description,
            created_at: Utc::now(),
        };
        self.storage.save_trip(trip.clone()).await?;
        info!("Created trip {}", trip.id);

        self.log_and_audit(
            Some(&trip.id),
            TRIP_CREATED,
            json!({ "trip_id": trip.id, "title": trip.title }),
            None,
        )
        .await?;

        Ok(trip)
    }

    pub async fn get_trip(&self, trip_id: &str) -> Result<Trip, TripLedgerError> {
        self.validate_trip(trip_id).await
    }

    /// Join a trip, minting a fresh participant id. The new member starts
    /// `unset` for every scheduled date; availability reads derive that
    /// default, so no rows are written here.
    pub async fn join_trip(
        &self,
        trip_id: &str,
        display_name: String,
    ) -> Result<TripMember, TripLedgerError> {
        let trip = self.validate_trip(trip_id).await?;
        self.validate_string_input("displayName", &display_name, MAX_NAME_LENGTH)?;

        let member = TripMember {
            user_id: Uuid::new_v4().to_string(),
            trip_id: trip.id.clone(),
            display_name,
            joined_at: Utc::now(),
        };
        self.storage.add_member(member.clone()).await?;
        debug!("User {} joined trip {}", member.user_id, trip.id);

        self.log_and_audit(
            Some(&trip.id),
            MEMBER_JOINED,
            json!({ "trip_id": trip.id, "display_name": member.display_name }),
            Some(&member.user_id),
        )
        .await?;

        Ok(member)
    }

    pub async fn list_members(&self, trip_id: &str) -> Result<Vec<TripMember>, TripLedgerError> {
        self.validate_trip(trip_id).await?;
        self.storage.list_members(trip_id).await
    }

    // EXPENSE LEDGER

    /// Append an expense to the trip's ledger. All validation happens before
    /// the write; a rejected expense leaves the ledger untouched.
    pub async fn add_expense(
        &self,
        trip_id: &str,
        payer_id: &str,
        amount: f64,
        currency: String,
        description: String,
        debtors: Vec<Debtor>,
    ) -> Result<Expense, TripLedgerError> {
        let trip = self.validate_trip(trip_id).await?;
        self.validate_membership(trip_id, payer_id).await?;
        self.validate_amount_input("amount", amount)?;
        self.validate_string_input("description", &description, MAX_DESCRIPTION_LENGTH)?;
        self.validate_string_input("currency", &currency, MAX_CURRENCY_LENGTH)?;

        if debtors.is_empty() {
            warn!("Expense for trip {} submitted without debtors", trip.id);
            return Err(TripLedgerError::EmptyDebtors);
        }
        for debtor in &debtors {
            if !debtor.value.is_finite() || debtor.value < 0.0 {
                return Err(TripLedgerError::InvalidInput(
                    "debtors".to_string(),
                    FieldError {
                        field: "debtors".to_string(),
                        title: "Invalid Share".to_string(),
                        description: format!(
                            "Share for user {} must be a non-negative finite number",
                            debtor.user_id
                        ),
                    },
                ));
            }
        }

        let membership_checks = debtors
            .iter()
            .map(|d| self.validate_membership(trip_id, &d.user_id));
        futures::future::try_join_all(membership_checks).await?;

        let share_sum: f64 = debtors.iter().map(|d| d.value).sum();
        if (share_sum - amount).abs() > SHARE_TOLERANCE {
            warn!(
                "Debtor shares {} do not match amount {} for trip {}",
                share_sum, amount, trip.id
            );
            return Err(TripLedgerError::ShareSumMismatch {
                expected: amount,
                actual: share_sum,
            });
        }

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            trip_id: trip.id.clone(),
            payer_id: payer_id.to_string(),
            amount,
            currency,
            description,
            debtors,
            created_at: Utc::now(),
        };
        self.storage.append_expense(expense.clone()).await?;
        debug!("Expense {} appended to trip {}", expense.id, trip.id);

        self.log_and_audit(
            Some(&trip.id),
            EXPENSE_ADDED,
            json!({
                "trip_id": trip.id,
                "expense_id": expense.id,
                "amount": expense.amount,
                "currency": expense.currency,
            }),
            Some(payer_id),
        )
        .await?;

        Ok(expense)
    }

    /// All expenses for the trip, in insertion order.
    pub async fn list_expenses(&self, trip_id: &str) -> Result<Vec<Expense>, TripLedgerError> {
        self.validate_trip(trip_id).await?;
        self.storage.list_expenses(trip_id).await
    }

    // SETTLEMENTS

    /// Compute the minimal transfer set for one trip and one currency.
    ///
    /// Works on a full snapshot of the ledger; when no currency is given the
    /// first expense's currency is used. Only expenses in the chosen currency
    /// participate.
    pub async fn compute_settlements(
        &self,
        trip_id: &str,
        currency: Option<&str>,
    ) -> Result<Vec<Transfer>, TripLedgerError> {
        let trip = self.validate_trip(trip_id).await?;
        let expenses = self.storage.list_expenses(trip_id).await?;
        if expenses.is_empty() {
            return Ok(Vec::new());
        }

        let currency = currency
            .map(str::to_owned)
            .unwrap_or_else(|| expenses[0].currency.clone());
        let in_currency: Vec<Expense> = expenses
            .into_iter()
            .filter(|e| e.currency == currency)
            .collect();

        let balances = settlement::net_balances(&in_currency);
        let transfers = settlement::minimize_transfers(&balances, &currency).map_err(|e| {
            tracing::error!("Settlement computation failed for trip {}: {}", trip.id, e);
            e
        })?;

        self.log_and_audit(
            Some(&trip.id),
            SETTLEMENTS_QUERIED,
            json!({
                "trip_id": trip.id,
                "currency": currency,
                "transfer_count": transfers.len(),
            }),
            None,
        )
        .await?;

        Ok(transfers)
    }

    // DATE AVAILABILITY

    /// Add candidate dates to the trip, skipping dates already scheduled.
    pub async fn add_trip_dates(
        &self,
        trip_id: &str,
        dates: Vec<NaiveDate>,
    ) -> Result<Vec<TripDate>, TripLedgerError> {
        let trip = self.validate_trip(trip_id).await?;
        let existing = self.storage.list_trip_dates(trip_id).await?;

        let mut added: Vec<TripDate> = Vec::new();
        for date in dates {
            let known = |d: &TripDate| d.date == date;
            if existing.iter().any(known) || added.iter().any(known) {
                continue;
            }
            let trip_date = TripDate {
                id: Uuid::new_v4().to_string(),
                trip_id: trip.id.clone(),
                date,
            };
            self.storage.save_trip_date(trip_date.clone()).await?;
            added.push(trip_date);
        }

        if !added.is_empty() {
            self.log_and_audit(
                Some(&trip.id),
                DATES_ADDED,
                json!({
                    "trip_id": trip.id,
                    "dates": added.iter().map(|d| d.date.to_string()).collect::<Vec<_>>(),
                }),
                None,
            )
            .await?;
        }

        let mut all = self.storage.list_trip_dates(trip_id).await?;
        all.sort_by_key(|d| d.date);
        Ok(all)
    }

    /// Expand a date range into candidate dates and schedule them, optionally
    /// keeping only the given weekdays (0 = Sunday through 6 = Saturday).
    /// Dates already scheduled are skipped, as in `add_trip_dates`.
    pub async fn generate_trip_dates(
        &self,
        trip_id: &str,
        date_start: NaiveDate,
        date_end: NaiveDate,
        allowed_weekdays: Option<Vec<u8>>,
    ) -> Result<Vec<TripDate>, TripLedgerError> {
        if date_end < date_start {
            return Err(TripLedgerError::InvalidInput(
                "dateEnd".to_string(),
                FieldError {
                    field: "dateEnd".to_string(),
                    title: "Invalid Date Range".to_string(),
                    description: "dateEnd must not precede dateStart".to_string(),
                },
            ));
        }
        if let Some(weekdays) = &allowed_weekdays {
            if weekdays.iter().any(|w| *w > 6) {
                return Err(TripLedgerError::InvalidInput(
                    "allowedWeekdays".to_string(),
                    FieldError {
                        field: "allowedWeekdays".to_string(),
                        title: "Invalid Weekday".to_string(),
                        description: "Weekdays must be 0 (Sunday) through 6 (Saturday)"
                            .to_string(),
                    },
                ));
            }
        }

        let allowed: Option<HashSet<u8>> = allowed_weekdays.map(|w| w.into_iter().collect());
        let dates: Vec<NaiveDate> = date_start
            .iter_days()
            .take_while(|d| *d <= date_end)
            .filter(|d| match &allowed {
                Some(weekdays) => weekdays.contains(&(d.weekday().num_days_from_sunday() as u8)),
                None => true,
            })
            .collect();
        self.add_trip_dates(trip_id, dates).await
    }

    pub async fn list_trip_dates(&self, trip_id: &str) -> Result<Vec<TripDate>, TripLedgerError> {
        self.validate_trip(trip_id).await?;
        let mut dates = self.storage.list_trip_dates(trip_id).await?;
        dates.sort_by_key(|d| d.date);
        Ok(dates)
    }

    /// Availability rows for every member and every scheduled date. Rows are
    /// derived from the membership and date lists at read time, so a pair
    /// with no stored status is reported as `unset` no matter which of the
    /// member or the date was created first.
    pub async fn list_availability(
        &self,
        trip_id: &str,
    ) -> Result<Vec<UserAvailability>, TripLedgerError> {
        self.validate_trip(trip_id).await?;
        let mut dates = self.storage.list_trip_dates(trip_id).await?;
        dates.sort_by_key(|d| d.date);
        let members = self.storage.list_members(trip_id).await?;

        let mut rows = Vec::with_capacity(dates.len() * members.len());
        for date in &dates {
            for member in &members {
                let status = self
                    .storage
                    .get_availability(&date.id, &member.user_id)
                    .await?
                    .unwrap_or_default();
                rows.push(UserAvailability {
                    trip_date_id: date.id.clone(),
                    user_id: member.user_id.clone(),
                    status,
                });
            }
        }
        Ok(rows)
    }

    /// Aggregated availability grid: sorted date list, member roster, and a
    /// per-member map of date to status with the same derived `unset` default
    /// as `list_availability`.
    pub async fn get_calendar(&self, trip_id: &str) -> Result<TripCalendar, TripLedgerError> {
        self.validate_trip(trip_id).await?;
        let mut dates = self.storage.list_trip_dates(trip_id).await?;
        dates.sort_by_key(|d| d.date);
        let members = self.storage.list_members(trip_id).await?;

        let mut availability = BTreeMap::new();
        for member in &members {
            let mut by_date = BTreeMap::new();
            for date in &dates {
                let status = self
                    .storage
                    .get_availability(&date.id, &member.user_id)
                    .await?
                    .unwrap_or_default();
                by_date.insert(date.date, status);
            }
            availability.insert(member.user_id.clone(), by_date);
        }

        Ok(TripCalendar {
            dates: dates.into_iter().map(|d| d.date).collect(),
            members,
            availability,
        })
    }

    pub async fn set_availability(
        &self,
        trip_id: &str,
        user_id: &str,
        date: NaiveDate,
        status: AvailabilityStatus,
    ) -> Result<UserAvailability, TripLedgerError> {
        let trip = self.validate_trip(trip_id).await?;
        self.validate_membership(trip_id, user_id).await?;
        let trip_date = self
            .storage
            .get_trip_date(trip_id, date)
            .await?
            .ok_or_else(|| TripLedgerError::TripDateNotFound(date.to_string()))?;

        self.storage
            .set_availability(&trip_date.id, user_id, status)
            .await?;

        self.log_and_audit(
            Some(&trip.id),
            AVAILABILITY_SET,
            json!({ "trip_id": trip.id, "date": date.to_string(), "status": status }),
            Some(user_id),
        )
        .await?;

        Ok(UserAvailability {
            trip_date_id: trip_date.id,
            user_id: user_id.to_string(),
            status,
        })
    }

    /// Advance a member's availability for one date along the fixed cycling
    /// order and return the new value.
    pub async fn cycle_availability(
        &self,
        trip_id: &str,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<UserAvailability, TripLedgerError> {
        self.validate_trip(trip_id).await?;
        self.validate_membership(trip_id, user_id).await?;
        let trip_date = self
            .storage
            .get_trip_date(trip_id, date)
            .await?
            .ok_or_else(|| TripLedgerError::TripDateNotFound(date.to_string()))?;

        let current = self
            .storage
            .get_availability(&trip_date.id, user_id)
            .await?
            .unwrap_or_default();
        self.set_availability(trip_id, user_id, date, current.cycle())
            .await
    }

    // AUDIT

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, TripLedgerError> {
        self.logging.get_logs().await
    }

    pub async fn get_trip_audits(&self, trip_id: &str) -> Result<Vec<TripAudit>, TripLedgerError> {
        self.validate_trip(trip_id).await?;
        self.storage.get_trip_audits(trip_id).await
    }
}

/// Short shareable trip handle: first 12 hex chars of a v4 UUID.
fn generate_trip_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(12);
    id
}
