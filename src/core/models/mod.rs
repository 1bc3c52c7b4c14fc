pub mod audit;
pub mod availability;
pub mod expense;
pub mod settlement;
pub mod trip;

pub use audit::{AppLog, TripAudit};
pub use availability::{AvailabilityStatus, TripCalendar, TripDate, UserAvailability};
pub use expense::{Debtor, Expense, ShareType};
pub use settlement::Transfer;
pub use trip::{Trip, TripMember};
