use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Application-level audit record, kept by the logging service.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AppLog {
    pub id: String,
    pub action: String,
    pub user_id: Option<String>,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// Audit record scoped to a single trip, persisted through storage.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TripAudit {
    pub id: String,
    pub trip_id: String,
    pub action: String,
    pub user_id: Option<String>,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}
