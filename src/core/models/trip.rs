use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Trip {
    /// Short shareable handle, 12 hex chars minted from a v4 UUID.
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A participant of one trip. Created on join and immutable afterwards;
/// the `user_id` is scoped to the trip and minted at join time.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TripMember {
    pub user_id: String,
    pub trip_id: String,
    pub display_name: String,
    pub joined_at: DateTime<Utc>,
}
