use serde::{Deserialize, Serialize};

/// A booked itinerary. Canceled reservations are retained forever and their
/// id is never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub rid: i64,
    pub username: String,
    pub day_of_month: i32,
    pub fid1: i32,
    /// Absent for direct itineraries.
    pub fid2: Option<i32>,
    pub price: i64,
    pub paid: bool,
    pub canceled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub balance: i64,
}
