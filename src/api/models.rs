use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::constants::DEFAULT_CURRENCY;
use crate::core::models::{
    AvailabilityStatus, Debtor, Expense, ShareType, Transfer, Trip, TripCalendar, TripDate,
    TripMember, UserAvailability,
};

// Request structs for JSON payloads. The wire format is camelCase,
// matching the existing client convention.

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinTripRequest {
    pub display_name: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DebtorDto {
    pub user_id: String,
    #[serde(default)]
    pub share_type: ShareType,
    pub value: f64,
}

impl From<DebtorDto> for Debtor {
    fn from(dto: DebtorDto) -> Self {
        Debtor {
            user_id: dto.user_id,
            share_type: dto.share_type,
            value: dto.value,
        }
    }
}

impl From<Debtor> for DebtorDto {
    fn from(debtor: Debtor) -> Self {
        DebtorDto {
            user_id: debtor.user_id,
            share_type: debtor.share_type,
            value: debtor.value,
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub payer_id: String,
    pub amount: f64,
    pub description: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub debtors: Vec<DebtorDto>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Deserialize, ToSchema)]
pub struct SettlementsQuery {
    pub currency: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddDatesRequest {
    pub dates: Vec<NaiveDate>,
}

/// Expands a date range into scheduled dates. Weekdays are numbered
/// 0 (Sunday) through 6 (Saturday); omitting the filter keeps every day
/// in the range.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDatesRequest {
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub allowed_weekdays: Option<Vec<u8>>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetAvailabilityRequest {
    pub user_id: String,
    pub date: NaiveDate,
    pub status: AvailabilityStatus,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CycleAvailabilityRequest {
    pub user_id: String,
    pub date: NaiveDate,
}

// Response structs

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        TripResponse {
            id: trip.id,
            title: trip.title,
            description: trip.description,
            created_at: trip.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub user_id: String,
    pub trip_id: String,
    pub display_name: String,
    pub joined_at: DateTime<Utc>,
}

impl From<TripMember> for MemberResponse {
    fn from(member: TripMember) -> Self {
        MemberResponse {
            user_id: member.user_id,
            trip_id: member.trip_id,
            display_name: member.display_name,
            joined_at: member.joined_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: String,
    pub trip_id: String,
    pub payer_id: String,
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub debtors: Vec<DebtorDto>,
    pub created_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        ExpenseResponse {
            id: expense.id,
            trip_id: expense.trip_id,
            payer_id: expense.payer_id,
            amount: expense.amount,
            currency: expense.currency,
            description: expense.description,
            debtors: expense.debtors.into_iter().map(DebtorDto::from).collect(),
            created_at: expense.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub from_user: String,
    pub to_user: String,
    pub amount: f64,
    pub currency: String,
}

impl From<Transfer> for TransferResponse {
    fn from(transfer: Transfer) -> Self {
        TransferResponse {
            from_user: transfer.from_user,
            to_user: transfer.to_user,
            amount: transfer.amount,
            currency: transfer.currency,
        }
    }
}

/// Settlements are returned under a `balances` key, which is what the
/// existing client expects.
#[derive(Serialize, ToSchema)]
pub struct SettlementsResponse {
    pub balances: Vec<TransferResponse>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripDateResponse {
    pub id: String,
    pub trip_id: String,
    pub date: NaiveDate,
}

impl From<TripDate> for TripDateResponse {
    fn from(trip_date: TripDate) -> Self {
        TripDateResponse {
            id: trip_date.id,
            trip_id: trip_date.trip_id,
            date: trip_date.date,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarUser {
    pub id: String,
    pub display_name: String,
}

/// Calendar grid keyed by user id, then by ISO date string.
#[derive(Serialize, ToSchema)]
pub struct CalendarResponse {
    pub dates: Vec<NaiveDate>,
    pub users: Vec<CalendarUser>,
    pub availability: BTreeMap<String, BTreeMap<String, AvailabilityStatus>>,
}

impl From<TripCalendar> for CalendarResponse {
    fn from(calendar: TripCalendar) -> Self {
        CalendarResponse {
            dates: calendar.dates,
            users: calendar
                .members
                .into_iter()
                .map(|m| CalendarUser {
                    id: m.user_id,
                    display_name: m.display_name,
                })
                .collect(),
            availability: calendar
                .availability
                .into_iter()
                .map(|(user_id, by_date)| {
                    let by_date = by_date
                        .into_iter()
                        .map(|(date, status)| (date.to_string(), status))
                        .collect();
                    (user_id, by_date)
                })
                .collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub trip_date_id: String,
    pub user_id: String,
    pub status: AvailabilityStatus,
}

impl From<UserAvailability> for AvailabilityResponse {
    fn from(row: UserAvailability) -> Self {
        AvailabilityResponse {
            trip_date_id: row.trip_date_id,
            user_id: row.user_id,
            status: row.status,
        }
    }
}
