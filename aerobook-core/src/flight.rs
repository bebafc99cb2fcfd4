use serde::{Deserialize, Serialize};

/// A scheduled flight, sourced read-only from the store.
///
/// Flights the store has marked canceled never reach this type; search
/// filters them out at the query level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub fid: i32,
    pub day_of_month: i32,
    pub carrier_id: String,
    pub flight_num: String,
    pub origin_city: String,
    pub dest_city: String,
    /// Scheduled duration in minutes.
    pub actual_time: i32,
    pub capacity: i32,
    pub price: i32,
}
