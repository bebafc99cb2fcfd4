//! Itinerary search and ranking.
//!
//! The store hands back two independently sorted candidate streams (direct
//! and one-hop); a linear merge with a deterministic tie-break produces the
//! global order, so repeated searches against unchanged data are reproducible
//! byte-for-byte.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::itinerary::Itinerary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub origin_city: String,
    pub dest_city: String,
    pub day_of_month: i32,
    pub direct_only: bool,
    pub limit: usize,
}

/// Merge two pre-sorted candidate queues into one ranked list of at most
/// `limit` itineraries.
///
/// Ordering is total duration ascending; ties break on first-leg fid, then
/// second-leg fid (with the absent-leg sentinel). The key can never be fully
/// equal across the two queues because a real fid is never the sentinel, so
/// the merge is deterministic for any number of equal-duration candidates.
pub fn merge_ranked(direct: Vec<Itinerary>, one_hop: Vec<Itinerary>, limit: usize) -> Vec<Itinerary> {
    let mut direct = VecDeque::from(direct);
    let mut one_hop = VecDeque::from(one_hop);
    let mut out = Vec::with_capacity(limit.min(direct.len() + one_hop.len()));

    while out.len() < limit {
        let from_direct = match (direct.front(), one_hop.front()) {
            (Some(d), Some(h)) => d.rank_key() <= h.rank_key(),
            (Some(_), None) => true,
            (None, _) => false,
        };
        let next = if from_direct {
            direct.pop_front()
        } else {
            one_hop.pop_front()
        };
        match next {
            Some(it) => out.push(it),
            None => break,
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::Flight;

    fn flight(fid: i32, origin: &str, dest: &str, time: i32) -> Flight {
        Flight {
            fid,
            day_of_month: 5,
            carrier_id: "AS".to_string(),
            flight_num: format!("{fid}"),
            origin_city: origin.to_string(),
            dest_city: dest.to_string(),
            actual_time: time,
            capacity: 10,
            price: 100,
        }
    }

    #[test]
    fn one_hop_beats_slower_direct() {
        // SEA -> LAX direct (120 min) vs SEA -> SFO -> LAX (40 + 50 min).
        let direct = vec![Itinerary::direct(flight(101, "SEA", "LAX", 120))];
        let one_hop = vec![Itinerary::one_hop(
            flight(102, "SEA", "SFO", 40),
            flight(103, "SFO", "LAX", 50),
        )];

        let ranked = merge_ranked(direct, one_hop, 3);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].leg_count(), 2);
        assert_eq!(ranked[0].total_time(), 90);
        assert_eq!(ranked[1].leg_count(), 1);
        assert_eq!(ranked[1].total_time(), 120);
    }

    #[test]
    fn duration_tie_breaks_on_first_leg_id() {
        // Equal 90-minute totals; the one-hop starts on the smaller fid.
        let direct = vec![Itinerary::direct(flight(105, "SEA", "LAX", 90))];
        let one_hop = vec![Itinerary::one_hop(
            flight(102, "SEA", "SFO", 40),
            flight(103, "SFO", "LAX", 50),
        )];

        let ranked = merge_ranked(direct, one_hop, 10);

        assert_eq!(ranked[0].first.fid, 102);
        assert_eq!(ranked[1].first.fid, 105);
    }

    #[test]
    fn duration_tie_favors_direct_with_smaller_first_id() {
        let direct = vec![Itinerary::direct(flight(101, "SEA", "LAX", 90))];
        let one_hop = vec![Itinerary::one_hop(
            flight(102, "SEA", "SFO", 40),
            flight(103, "SFO", "LAX", 50),
        )];

        let ranked = merge_ranked(direct, one_hop, 10);

        assert_eq!(ranked[0].first.fid, 101);
        assert_eq!(ranked[0].leg_count(), 1);
        assert_eq!(ranked[1].first.fid, 102);
    }

    #[test]
    fn three_way_tie_orders_by_key() {
        let direct = vec![
            Itinerary::direct(flight(103, "SEA", "LAX", 90)),
            Itinerary::direct(flight(110, "SEA", "LAX", 90)),
        ];
        let one_hop = vec![Itinerary::one_hop(
            flight(104, "SEA", "PDX", 45),
            flight(105, "PDX", "LAX", 45),
        )];

        let ranked = merge_ranked(direct, one_hop, 10);

        let fids: Vec<i32> = ranked.iter().map(|it| it.first.fid).collect();
        assert_eq!(fids, vec![103, 104, 110]);
    }

    #[test]
    fn limit_caps_total_output() {
        let direct = vec![
            Itinerary::direct(flight(1, "SEA", "LAX", 50)),
            Itinerary::direct(flight(2, "SEA", "LAX", 70)),
        ];
        let one_hop = vec![
            Itinerary::one_hop(flight(3, "SEA", "SFO", 30), flight(4, "SFO", "LAX", 30)),
            Itinerary::one_hop(flight(5, "SEA", "SFO", 40), flight(6, "SFO", "LAX", 40)),
        ];

        let ranked = merge_ranked(direct, one_hop, 3);

        assert_eq!(ranked.len(), 3);
        assert_eq!(
            ranked.iter().map(Itinerary::total_time).collect::<Vec<_>>(),
            vec![50, 60, 70]
        );
    }

    #[test]
    fn drains_remainder_in_queue_order() {
        let direct = vec![
            Itinerary::direct(flight(1, "SEA", "LAX", 10)),
            Itinerary::direct(flight(2, "SEA", "LAX", 20)),
            Itinerary::direct(flight(3, "SEA", "LAX", 30)),
        ];

        let ranked = merge_ranked(direct, vec![], 10);

        assert_eq!(
            ranked.iter().map(|it| it.first.fid).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn empty_queues_yield_empty_result() {
        assert!(merge_ranked(vec![], vec![], 5).is_empty());
    }
}
