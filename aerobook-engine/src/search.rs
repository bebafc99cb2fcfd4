use aerobook_core::search::{merge_ranked, SearchRequest};
use aerobook_core::Itinerary;
use tracing::debug;

use crate::error::OpError;
use crate::session::Session;
use crate::BookingEngine;

impl BookingEngine {
    /// Searches the route and day, producing a ranked list of at most
    /// `req.limit` itineraries.
    ///
    /// The returned list replaces the session's snapshot in emission order
    /// (index 0 first), including when it is empty. On a store failure the
    /// snapshot is left untouched and no partial result escapes.
    pub async fn search(
        &self,
        session: &mut Session,
        req: &SearchRequest,
    ) -> Result<Vec<Itinerary>, OpError> {
        let limit = req.limit as i64;
        let direct_count = self
            .flights
            .count_direct(&req.origin_city, &req.dest_city, req.day_of_month)
            .await
            .map_err(OpError::Store)?;
        let direct: Vec<Itinerary> = self
            .flights
            .direct_flights(&req.origin_city, &req.dest_city, req.day_of_month, limit)
            .await
            .map_err(OpError::Store)?
            .into_iter()
            .map(Itinerary::direct)
            .collect();

        let ranked = if req.direct_only || direct_count >= limit {
            let mut direct = direct;
            direct.truncate(req.limit);
            direct
        } else {
            let one_hop: Vec<Itinerary> = self
                .flights
                .one_hop_flights(
                    &req.origin_city,
                    &req.dest_city,
                    req.day_of_month,
                    limit - direct_count,
                )
                .await
                .map_err(OpError::Store)?
                .into_iter()
                .map(|(first, second)| Itinerary::one_hop(first, second))
                .collect();
            merge_ranked(direct, one_hop, req.limit)
        };

        debug!(
            origin = %req.origin_city,
            dest = %req.dest_city,
            day = req.day_of_month,
            results = ranked.len(),
            "search complete"
        );
        session.replace_snapshot(ranked.clone());
        Ok(ranked)
    }
}
