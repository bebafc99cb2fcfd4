use serde::{Deserialize, Serialize};

use crate::flight::Flight;

/// Sentinel flight id used when an itinerary has no second leg.
///
/// Real flight ids are non-negative, so the sentinel only ever compares
/// against itself. It exists purely for ordering and is never persisted:
/// reservations store an absent second leg as NULL.
pub const NO_SECOND_LEG: i32 = -1;

/// One or two flights forming a bookable trip on a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub first: Flight,
    pub second: Option<Flight>,
}

impl Itinerary {
    pub fn direct(first: Flight) -> Self {
        Self {
            first,
            second: None,
        }
    }

    pub fn one_hop(first: Flight, second: Flight) -> Self {
        Self {
            first,
            second: Some(second),
        }
    }

    pub fn leg_count(&self) -> usize {
        if self.second.is_some() {
            2
        } else {
            1
        }
    }

    /// Total duration in minutes across all legs.
    pub fn total_time(&self) -> i32 {
        self.first.actual_time + self.second.as_ref().map_or(0, |f| f.actual_time)
    }

    /// Total price across all legs.
    pub fn total_price(&self) -> i64 {
        i64::from(self.first.price) + self.second.as_ref().map_or(0, |f| i64::from(f.price))
    }

    /// Day of the trip; both legs are always on the same day.
    pub fn day(&self) -> i32 {
        self.first.day_of_month
    }

    pub fn legs(&self) -> impl Iterator<Item = &Flight> {
        std::iter::once(&self.first).chain(self.second.as_ref())
    }

    /// Ordering key for ranked search results: total duration, then
    /// first-leg id, then second-leg id (sentinel for an absent leg).
    pub fn rank_key(&self) -> (i32, i32, i32) {
        (
            self.total_time(),
            self.first.fid,
            self.second.as_ref().map_or(NO_SECOND_LEG, |f| f.fid),
        )
    }
}
