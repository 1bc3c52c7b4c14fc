use chrono::{NaiveDate, Utc};

use crate::core::errors::TripLedgerError;
use crate::core::models::{AvailabilityStatus, Trip, TripDate, TripMember};
use crate::core::services::TripLedgerService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use crate::infrastructure::storage::Storage;
use crate::tests::create_test_service;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_add_dates_deduplicates() {
    let service = create_test_service();
    let trip = service.create_trip("Hike".to_string(), None).await.unwrap();

    let dates = service
        .add_trip_dates(&trip.id, vec![date("2026-07-01"), date("2026-07-02")])
        .await
        .unwrap();
    assert_eq!(dates.len(), 2);

    let dates = service
        .add_trip_dates(&trip.id, vec![date("2026-07-02"), date("2026-07-03")])
        .await
        .unwrap();
    assert_eq!(dates.len(), 3);
    assert!(dates.windows(2).all(|w| w[0].date < w[1].date));
}

#[tokio::test]
async fn test_new_dates_report_unset_for_members() {
    let service = create_test_service();
    let trip = service.create_trip("Hike".to_string(), None).await.unwrap();
    let alice = service
        .join_trip(&trip.id, "Alice".to_string())
        .await
        .unwrap();

    service
        .add_trip_dates(&trip.id, vec![date("2026-07-01")])
        .await
        .unwrap();

    let rows = service.list_availability(&trip.id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, alice.user_id);
    assert_eq!(rows[0].status, AvailabilityStatus::Unset);
}

#[tokio::test]
async fn test_late_joiner_gets_unset_rows() {
    let service = create_test_service();
    let trip = service.create_trip("Hike".to_string(), None).await.unwrap();
    service
        .add_trip_dates(&trip.id, vec![date("2026-07-01"), date("2026-07-02")])
        .await
        .unwrap();

    let bob = service.join_trip(&trip.id, "Bob".to_string()).await.unwrap();

    let rows = service.list_availability(&trip.id).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .all(|r| r.user_id == bob.user_id && r.status == AvailabilityStatus::Unset));
}

#[tokio::test]
async fn test_availability_covers_rows_never_written() {
    // A member and a date written straight to storage, bypassing the paths
    // that would normally accompany them. The read side must still report
    // the pair as unset.
    let storage = InMemoryStorage::new();
    storage
        .save_trip(Trip {
            id: "t1".to_string(),
            title: "Hike".to_string(),
            description: None,
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    storage
        .add_member(TripMember {
            user_id: "u1".to_string(),
            trip_id: "t1".to_string(),
            display_name: "Alice".to_string(),
            joined_at: Utc::now(),
        })
        .await
        .unwrap();
    storage
        .save_trip_date(TripDate {
            id: "d1".to_string(),
            trip_id: "t1".to_string(),
            date: date("2026-07-01"),
        })
        .await
        .unwrap();

    let service = TripLedgerService::new(storage, InMemoryLogging::new());
    let rows = service.list_availability("t1").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].trip_date_id, "d1");
    assert_eq!(rows[0].user_id, "u1");
    assert_eq!(rows[0].status, AvailabilityStatus::Unset);
}

#[tokio::test]
async fn test_generate_dates_respects_weekday_filter() {
    let service = create_test_service();
    let trip = service.create_trip("Hike".to_string(), None).await.unwrap();

    // Weekends only: 0 = Sunday, 6 = Saturday.
    let dates = service
        .generate_trip_dates(&trip.id, date("2026-07-01"), date("2026-07-14"), Some(vec![0, 6]))
        .await
        .unwrap();
    let days: Vec<NaiveDate> = dates.iter().map(|d| d.date).collect();
    assert_eq!(
        days,
        vec![
            date("2026-07-04"),
            date("2026-07-05"),
            date("2026-07-11"),
            date("2026-07-12"),
        ]
    );
}

#[tokio::test]
async fn test_generate_dates_skips_existing() {
    let service = create_test_service();
    let trip = service.create_trip("Hike".to_string(), None).await.unwrap();
    service
        .add_trip_dates(&trip.id, vec![date("2026-07-02")])
        .await
        .unwrap();

    let dates = service
        .generate_trip_dates(&trip.id, date("2026-07-01"), date("2026-07-03"), None)
        .await
        .unwrap();
    assert_eq!(dates.len(), 3);
    assert!(dates.windows(2).all(|w| w[0].date < w[1].date));
}

#[tokio::test]
async fn test_generate_dates_rejects_bad_input() {
    let service = create_test_service();
    let trip = service.create_trip("Hike".to_string(), None).await.unwrap();

    let result = service
        .generate_trip_dates(&trip.id, date("2026-07-10"), date("2026-07-01"), None)
        .await;
    assert!(matches!(result, Err(TripLedgerError::InvalidInput(_, _))));

    let result = service
        .generate_trip_dates(&trip.id, date("2026-07-01"), date("2026-07-03"), Some(vec![7]))
        .await;
    assert!(matches!(result, Err(TripLedgerError::InvalidInput(_, _))));
}

#[tokio::test]
async fn test_calendar_aggregates_statuses() {
    let service = create_test_service();
    let trip = service.create_trip("Hike".to_string(), None).await.unwrap();
    let alice = service
        .join_trip(&trip.id, "Alice".to_string())
        .await
        .unwrap();
    let bob = service.join_trip(&trip.id, "Bob".to_string()).await.unwrap();
    service
        .add_trip_dates(&trip.id, vec![date("2026-07-02"), date("2026-07-01")])
        .await
        .unwrap();
    service
        .set_availability(
            &trip.id,
            &alice.user_id,
            date("2026-07-01"),
            AvailabilityStatus::Available,
        )
        .await
        .unwrap();

    let calendar = service.get_calendar(&trip.id).await.unwrap();
    assert_eq!(calendar.dates, vec![date("2026-07-01"), date("2026-07-02")]);
    assert_eq!(calendar.members.len(), 2);

    let by_date = &calendar.availability[&alice.user_id];
    assert_eq!(by_date[&date("2026-07-01")], AvailabilityStatus::Available);
    assert_eq!(by_date[&date("2026-07-02")], AvailabilityStatus::Unset);
    assert!(calendar.availability[&bob.user_id]
        .values()
        .all(|s| *s == AvailabilityStatus::Unset));
}

#[tokio::test]
async fn test_set_availability() {
    let service = create_test_service();
    let trip = service.create_trip("Hike".to_string(), None).await.unwrap();
    let alice = service
        .join_trip(&trip.id, "Alice".to_string())
        .await
        .unwrap();
    service
        .add_trip_dates(&trip.id, vec![date("2026-07-01")])
        .await
        .unwrap();

    let row = service
        .set_availability(
            &trip.id,
            &alice.user_id,
            date("2026-07-01"),
            AvailabilityStatus::Maybe,
        )
        .await
        .unwrap();
    assert_eq!(row.status, AvailabilityStatus::Maybe);

    let rows = service.list_availability(&trip.id).await.unwrap();
    assert_eq!(rows[0].status, AvailabilityStatus::Maybe);
}

#[tokio::test]
async fn test_cycle_availability_follows_fixed_order() {
    let service = create_test_service();
    let trip = service.create_trip("Hike".to_string(), None).await.unwrap();
    let alice = service
        .join_trip(&trip.id, "Alice".to_string())
        .await
        .unwrap();
    service
        .add_trip_dates(&trip.id, vec![date("2026-07-01")])
        .await
        .unwrap();

    let expected = [
        AvailabilityStatus::Available,
        AvailabilityStatus::Maybe,
        AvailabilityStatus::Unavailable,
        AvailabilityStatus::Unset,
        AvailabilityStatus::Available,
    ];
    for status in expected {
        let row = service
            .cycle_availability(&trip.id, &alice.user_id, date("2026-07-01"))
            .await
            .unwrap();
        assert_eq!(row.status, status);
    }
}

#[tokio::test]
async fn test_set_availability_unknown_date() {
    let service = create_test_service();
    let trip = service.create_trip("Hike".to_string(), None).await.unwrap();
    let alice = service
        .join_trip(&trip.id, "Alice".to_string())
        .await
        .unwrap();

    let result = service
        .set_availability(
            &trip.id,
            &alice.user_id,
            date("2026-07-01"),
            AvailabilityStatus::Available,
        )
        .await;
    assert!(matches!(result, Err(TripLedgerError::TripDateNotFound(_))));
}

#[tokio::test]
async fn test_set_availability_not_a_member() {
    let service = create_test_service();
    let trip = service.create_trip("Hike".to_string(), None).await.unwrap();
    service
        .add_trip_dates(&trip.id, vec![date("2026-07-01")])
        .await
        .unwrap();

    let result = service
        .set_availability(
            &trip.id,
            "stranger",
            date("2026-07-01"),
            AvailabilityStatus::Available,
        )
        .await;
    assert!(matches!(result, Err(TripLedgerError::NotTripMember(_))));
}
