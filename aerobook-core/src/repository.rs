use async_trait::async_trait;

use crate::flight::Flight;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Repository trait for flight data access.
///
/// Implementations must return both result sets already sorted: direct
/// flights by (duration, fid) and one-hop pairs by (summed duration,
/// first fid, second fid). The merge step relies on that order.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Number of non-canceled direct flights on the route and day.
    async fn count_direct(&self, origin: &str, dest: &str, day: i32) -> Result<i64, BoxError>;

    /// Up to `limit` direct flights, ordered by (duration, fid).
    async fn direct_flights(
        &self,
        origin: &str,
        dest: &str,
        day: i32,
        limit: i64,
    ) -> Result<Vec<Flight>, BoxError>;

    /// Up to `limit` one-hop pairs where the first leg's destination is the
    /// second leg's origin, both on the given day, ordered by
    /// (summed duration, first fid, second fid).
    async fn one_hop_flights(
        &self,
        origin: &str,
        dest: &str,
        day: i32,
        limit: i64,
    ) -> Result<Vec<(Flight, Flight)>, BoxError>;
}
