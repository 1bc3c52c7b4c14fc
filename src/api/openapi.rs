use utoipa::OpenApi;

use crate::{
    api::models::{
        AddDatesRequest, AvailabilityResponse, CalendarResponse, CalendarUser,
        CreateExpenseRequest, CreateTripRequest, CycleAvailabilityRequest, DebtorDto,
        ErrorResponse, ExpenseResponse, GenerateDatesRequest, JoinTripRequest, MemberResponse,
        SetAvailabilityRequest, SettlementsResponse, TransferResponse, TripDateResponse,
        TripResponse,
    },
    core::models::{AppLog, AvailabilityStatus, ShareType, TripAudit},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_trip,
        super::handlers::get_trip,
        super::handlers::join_trip,
        super::handlers::list_members,
        super::handlers::add_expense,
        super::handlers::list_expenses,
        super::handlers::get_settlements,
        super::handlers::add_trip_dates,
        super::handlers::list_trip_dates,
        super::handlers::generate_trip_dates,
        super::handlers::get_calendar,
        super::handlers::list_availability,
        super::handlers::set_availability,
        super::handlers::cycle_availability,
        super::handlers::get_app_logs,
        super::handlers::get_trip_audits
    ),
    components(schemas(
        CreateTripRequest,
        JoinTripRequest,
        CreateExpenseRequest,
        AddDatesRequest,
        GenerateDatesRequest,
        SetAvailabilityRequest,
        CycleAvailabilityRequest,
        DebtorDto,
        ShareType,
        AvailabilityStatus,
        TripResponse,
        MemberResponse,
        ExpenseResponse,
        TransferResponse,
        SettlementsResponse,
        TripDateResponse,
        AvailabilityResponse,
        CalendarUser,
        CalendarResponse,
        ErrorResponse,
        AppLog,
        TripAudit
    )),
    info(
        title = "TripLedger API",
        description = "API for trip planning, shared expense ledgers and settlements",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
