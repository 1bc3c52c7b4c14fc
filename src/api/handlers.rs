use crate::{
    api::models::*,
    core::{
        errors::TripLedgerError,
        models::{AppLog, TripAudit},
        services::TripLedgerService,
    },
    infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

// Newtype wrapper for TripLedgerError to implement IntoResponse
pub struct ApiError(TripLedgerError);

impl From<TripLedgerError> for ApiError {
    fn from(err: TripLedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            TripLedgerError::TripNotFound(_) | TripLedgerError::TripDateNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            TripLedgerError::NotTripMember(_) => StatusCode::FORBIDDEN,
            TripLedgerError::EmptyDebtors
            | TripLedgerError::ShareSumMismatch { .. }
            | TripLedgerError::InvalidInput(_, _) => StatusCode::BAD_REQUEST,
            TripLedgerError::InconsistentLedger { .. }
            | TripLedgerError::StorageError(_)
            | TripLedgerError::LoggingError(_)
            | TripLedgerError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

// Define API routes
pub fn api_routes(service: Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/trips", post(create_trip))
        .route("/trips/{trip_id}", get(get_trip))
        .route("/trips/{trip_id}/members", post(join_trip).get(list_members))
        .route(
            "/trips/{trip_id}/expenses",
            post(add_expense).get(list_expenses),
        )
        .route("/trips/{trip_id}/settlements", get(get_settlements))
        .route(
            "/trips/{trip_id}/dates",
            post(add_trip_dates).get(list_trip_dates),
        )
        .route(
            "/trips/{trip_id}/dates/generate",
            post(generate_trip_dates),
        )
        .route("/trips/{trip_id}/calendar", get(get_calendar))
        .route(
            "/trips/{trip_id}/availability",
            put(set_availability).get(list_availability),
        )
        .route(
            "/trips/{trip_id}/availability/cycle",
            post(cycle_availability),
        )
        .route("/logs", get(get_app_logs))
        .route("/trips/{trip_id}/audits", get(get_trip_audits))
        .with_state(service)
}

async fn health() -> &'static str {
    "OK"
}

#[utoipa::path(
    post,
    path = "/trips",
    request_body = CreateTripRequest,
    responses(
        (status = 201, description = "Trip created", body = TripResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
pub async fn create_trip(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Json(req): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<TripResponse>), ApiError> {
    let trip = service.create_trip(req.title, req.description).await?;
    Ok((StatusCode::CREATED, Json(trip.into())))
}

#[utoipa::path(
    get,
    path = "/trips/{trip_id}",
    params(("trip_id" = String, Path, description = "Trip handle")),
    responses(
        (status = 200, description = "Trip found", body = TripResponse),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn get_trip(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<TripResponse>, ApiError> {
    let trip = service.get_trip(&trip_id).await?;
    Ok(Json(trip.into()))
}

#[utoipa::path(
    post,
    path = "/trips/{trip_id}/members",
    params(("trip_id" = String, Path, description = "Trip handle")),
    request_body = JoinTripRequest,
    responses(
        (status = 201, description = "Member joined", body = MemberResponse),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn join_trip(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
    Json(req): Json<JoinTripRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    let member = service.join_trip(&trip_id, req.display_name).await?;
    Ok((StatusCode::CREATED, Json(member.into())))
}

#[utoipa::path(
    get,
    path = "/trips/{trip_id}/members",
    params(("trip_id" = String, Path, description = "Trip handle")),
    responses(
        (status = 200, description = "Trip members", body = [MemberResponse]),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn list_members(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let members = service.list_members(&trip_id).await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/trips/{trip_id}/expenses",
    params(("trip_id" = String, Path, description = "Trip handle")),
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense appended to the ledger", body = ExpenseResponse),
        (status = 400, description = "Invalid expense", body = ErrorResponse),
        (status = 403, description = "Payer or debtor is not a member", body = ErrorResponse),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn add_expense(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>), ApiError> {
    let expense = service
        .add_expense(
            &trip_id,
            &req.payer_id,
            req.amount,
            req.currency,
            req.description,
            req.debtors.into_iter().map(Into::into).collect(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(expense.into())))
}

#[utoipa::path(
    get,
    path = "/trips/{trip_id}/expenses",
    params(("trip_id" = String, Path, description = "Trip handle")),
    responses(
        (status = 200, description = "Ledger in insertion order", body = [ExpenseResponse]),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn list_expenses(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let expenses = service.list_expenses(&trip_id).await?;
    Ok(Json(expenses.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/trips/{trip_id}/settlements",
    params(
        ("trip_id" = String, Path, description = "Trip handle"),
        ("currency" = Option<String>, Query, description = "Settlement currency; defaults to the first expense's currency")
    ),
    responses(
        (status = 200, description = "Minimal transfer set", body = SettlementsResponse),
        (status = 404, description = "Trip not found", body = ErrorResponse),
        (status = 500, description = "Ledger invariant violation", body = ErrorResponse)
    )
)]
pub async fn get_settlements(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
    Query(query): Query<SettlementsQuery>,
) -> Result<Json<SettlementsResponse>, ApiError> {
    let transfers = service
        .compute_settlements(&trip_id, query.currency.as_deref())
        .await?;
    Ok(Json(SettlementsResponse {
        balances: transfers.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/trips/{trip_id}/dates",
    params(("trip_id" = String, Path, description = "Trip handle")),
    request_body = AddDatesRequest,
    responses(
        (status = 200, description = "All scheduled dates after the insert", body = [TripDateResponse]),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn add_trip_dates(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
    Json(req): Json<AddDatesRequest>,
) -> Result<Json<Vec<TripDateResponse>>, ApiError> {
    let dates = service.add_trip_dates(&trip_id, req.dates).await?;
    Ok(Json(dates.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/trips/{trip_id}/dates",
    params(("trip_id" = String, Path, description = "Trip handle")),
    responses(
        (status = 200, description = "Scheduled dates", body = [TripDateResponse]),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn list_trip_dates(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<TripDateResponse>>, ApiError> {
    let dates = service.list_trip_dates(&trip_id).await?;
    Ok(Json(dates.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/trips/{trip_id}/dates/generate",
    params(("trip_id" = String, Path, description = "Trip handle")),
    request_body = GenerateDatesRequest,
    responses(
        (status = 200, description = "All scheduled dates after the expansion", body = [TripDateResponse]),
        (status = 400, description = "Invalid range or weekday filter", body = ErrorResponse),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn generate_trip_dates(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
    Json(req): Json<GenerateDatesRequest>,
) -> Result<Json<Vec<TripDateResponse>>, ApiError> {
    let dates = service
        .generate_trip_dates(&trip_id, req.date_start, req.date_end, req.allowed_weekdays)
        .await?;
    Ok(Json(dates.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/trips/{trip_id}/calendar",
    params(("trip_id" = String, Path, description = "Trip handle")),
    responses(
        (status = 200, description = "Per-member availability grid", body = CalendarResponse),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn get_calendar(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<CalendarResponse>, ApiError> {
    let calendar = service.get_calendar(&trip_id).await?;
    Ok(Json(calendar.into()))
}

#[utoipa::path(
    get,
    path = "/trips/{trip_id}/availability",
    params(("trip_id" = String, Path, description = "Trip handle")),
    responses(
        (status = 200, description = "Availability rows for all scheduled dates", body = [AvailabilityResponse]),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn list_availability(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<AvailabilityResponse>>, ApiError> {
    let rows = service.list_availability(&trip_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    put,
    path = "/trips/{trip_id}/availability",
    params(("trip_id" = String, Path, description = "Trip handle")),
    request_body = SetAvailabilityRequest,
    responses(
        (status = 200, description = "Availability updated", body = AvailabilityResponse),
        (status = 403, description = "Not a trip member", body = ErrorResponse),
        (status = 404, description = "Trip or date not found", body = ErrorResponse)
    )
)]
pub async fn set_availability(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
    Json(req): Json<SetAvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let row = service
        .set_availability(&trip_id, &req.user_id, req.date, req.status)
        .await?;
    Ok(Json(row.into()))
}

#[utoipa::path(
    post,
    path = "/trips/{trip_id}/availability/cycle",
    params(("trip_id" = String, Path, description = "Trip handle")),
    request_body = CycleAvailabilityRequest,
    responses(
        (status = 200, description = "Availability advanced to the next status", body = AvailabilityResponse),
        (status = 403, description = "Not a trip member", body = ErrorResponse),
        (status = 404, description = "Trip or date not found", body = ErrorResponse)
    )
)]
pub async fn cycle_availability(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
    Json(req): Json<CycleAvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let row = service
        .cycle_availability(&trip_id, &req.user_id, req.date)
        .await?;
    Ok(Json(row.into()))
}

#[utoipa::path(
    get,
    path = "/logs",
    responses((status = 200, description = "Application audit log", body = [AppLog]))
)]
pub async fn get_app_logs(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}

#[utoipa::path(
    get,
    path = "/trips/{trip_id}/audits",
    params(("trip_id" = String, Path, description = "Trip handle")),
    responses(
        (status = 200, description = "Per-trip audit records", body = [TripAudit]),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn get_trip_audits(
    State(service): State<Arc<TripLedgerService<InMemoryLogging, InMemoryStorage>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<TripAudit>>, ApiError> {
    let audits = service.get_trip_audits(&trip_id).await?;
    Ok(Json(audits))
}
