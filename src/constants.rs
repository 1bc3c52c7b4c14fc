/// Maximum drift tolerated between an expense amount and the sum of its
/// debtor shares. Also bounds the zero-sum check on computed balances.
pub const SHARE_TOLERANCE: f64 = 1e-6;

/// Balances within a cent of zero are considered settled and are excluded
/// from transfer matching.
pub const SETTLE_THRESHOLD: f64 = 0.01;

pub const DEFAULT_CURRENCY: &str = "USD";

pub const MAX_AMOUNT: f64 = 1_000_000.0;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_CURRENCY_LENGTH: usize = 10;

// Audit action names.
pub const TRIP_CREATED: &str = "trip_created";
pub const MEMBER_JOINED: &str = "member_joined";
pub const EXPENSE_ADDED: &str = "expense_added";
pub const SETTLEMENTS_QUERIED: &str = "settlements_queried";
pub const DATES_ADDED: &str = "dates_added";
pub const AVAILABILITY_SET: &str = "availability_set";
