use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::trip::TripMember;

/// Per-member availability for one trip date. The variants form a fixed
/// cycling order so the calendar can step through them with a single tap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    #[default]
    Unset,
    Available,
    Maybe,
    Unavailable,
}

impl AvailabilityStatus {
    /// Next status in the cycling order:
    /// unset -> available -> maybe -> unavailable -> unset.
    pub fn cycle(self) -> Self {
        match self {
            Self::Unset => Self::Available,
            Self::Available => Self::Maybe,
            Self::Maybe => Self::Unavailable,
            Self::Unavailable => Self::Unset,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TripDate {
    pub id: String,
    pub trip_id: String,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserAvailability {
    pub trip_date_id: String,
    pub user_id: String,
    pub status: AvailabilityStatus,
}

/// Aggregated availability grid for one trip: the sorted date list, the
/// member roster, and per member a map of date to status. Pairs with no
/// stored status appear as `unset`.
#[derive(Clone, Debug, Serialize)]
pub struct TripCalendar {
    pub dates: Vec<NaiveDate>,
    pub members: Vec<TripMember>,
    pub availability: BTreeMap<String, BTreeMap<NaiveDate, AvailabilityStatus>>,
}
