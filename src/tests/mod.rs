mod availability_tests;
mod trip_tests;

use crate::core::services::TripLedgerService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> TripLedgerService<InMemoryLogging, InMemoryStorage> {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    TripLedgerService::new(storage, logging)
}
