use crate::constants::{MEMBER_JOINED, TRIP_CREATED};
use crate::core::errors::TripLedgerError;
use crate::tests::create_test_service;

#[tokio::test]
async fn test_create_and_get_trip() {
    let service = create_test_service();

    let trip = service
        .create_trip("Summer in Lisbon".to_string(), Some("June".to_string()))
        .await
        .unwrap();
    assert_eq!(trip.id.len(), 12);
    assert_eq!(trip.title, "Summer in Lisbon");

    let fetched = service.get_trip(&trip.id).await.unwrap();
    assert_eq!(fetched.id, trip.id);
    assert_eq!(fetched.description.as_deref(), Some("June"));
}

#[tokio::test]
async fn test_create_trip_empty_title() {
    let service = create_test_service();

    let result = service.create_trip("   ".to_string(), None).await;
    assert!(matches!(result, Err(TripLedgerError::InvalidInput(_, _))));
}

#[tokio::test]
async fn test_get_unknown_trip() {
    let service = create_test_service();

    let result = service.get_trip("nonexistent").await;
    assert!(matches!(result, Err(TripLedgerError::TripNotFound(_))));
}

#[tokio::test]
async fn test_join_trip_and_list_members() {
    let service = create_test_service();
    let trip = service.create_trip("Hike".to_string(), None).await.unwrap();

    let alice = service
        .join_trip(&trip.id, "Alice".to_string())
        .await
        .unwrap();
    let bob = service.join_trip(&trip.id, "Bob".to_string()).await.unwrap();
    assert_ne!(alice.user_id, bob.user_id);

    let members = service.list_members(&trip.id).await.unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].display_name, "Alice");
    assert_eq!(members[1].display_name, "Bob");
}

#[tokio::test]
async fn test_join_unknown_trip() {
    let service = create_test_service();

    let result = service.join_trip("nonexistent", "Alice".to_string()).await;
    assert!(matches!(result, Err(TripLedgerError::TripNotFound(_))));
}

#[tokio::test]
async fn test_actions_are_audited() {
    let service = create_test_service();
    let trip = service.create_trip("Audit".to_string(), None).await.unwrap();
    service
        .join_trip(&trip.id, "Alice".to_string())
        .await
        .unwrap();

    let audits = service.get_trip_audits(&trip.id).await.unwrap();
    let actions: Vec<&str> = audits.iter().map(|a| a.action.as_str()).collect();
    assert!(actions.contains(&TRIP_CREATED));
    assert!(actions.contains(&MEMBER_JOINED));

    let logs = service.get_app_logs().await.unwrap();
    assert!(logs.iter().any(|l| l.action == TRIP_CREATED));
}
