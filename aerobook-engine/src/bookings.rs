use aerobook_store::{ReservationStore, UserStore};
use tracing::info;

use crate::error::OpError;
use crate::session::Session;
use crate::BookingEngine;

impl BookingEngine {
    /// Books the itinerary at `index` in the session's search snapshot.
    ///
    /// Capacity, same-day, price, and reservation-id reads all happen inside
    /// the same serializable transaction as the insert, so the store's
    /// isolation is the only arbiter between concurrent bookers. Returns the
    /// new reservation id.
    pub async fn book(&self, session: &Session, index: usize) -> Result<i64, OpError> {
        let username = session
            .user()
            .ok_or(OpError::NotLoggedIn)?
            .to_string();
        let itinerary = session
            .itinerary(index)
            .cloned()
            .ok_or(OpError::NoSuchItinerary(index))?;

        let mut tx = self.db.begin_serializable().await?;

        // Capacities and prices are re-read from the store rather than
        // trusted from the snapshot, which may predate other commits.
        let mut total: i64 = 0;
        for leg in itinerary.legs() {
            let capacity = ReservationStore::flight_capacity(&mut tx, leg.fid)
                .await?
                .ok_or(OpError::MissingFlight(leg.fid))?;
            let taken = ReservationStore::seats_taken(&mut tx, leg.fid).await?;
            if taken >= i64::from(capacity) {
                return Err(OpError::FlightFull(leg.fid));
            }
            let price = ReservationStore::flight_price(&mut tx, leg.fid)
                .await?
                .ok_or(OpError::MissingFlight(leg.fid))?;
            total += i64::from(price);
        }

        let day = itinerary.day();
        if ReservationStore::has_reservation_on_day(&mut tx, &username, day).await? {
            return Err(OpError::DuplicateDay(day));
        }

        let rid = ReservationStore::next_rid(&mut tx).await?;
        ReservationStore::insert(
            &mut tx,
            rid,
            &username,
            day,
            itinerary.first.fid,
            itinerary.second.as_ref().map(|f| f.fid),
            total,
        )
        .await?;

        tx.commit().await?;

        info!(rid, username = %username, day, total, "booked itinerary");
        Ok(rid)
    }

    /// Cancels a reservation owned by the session's user.
    ///
    /// A paid reservation is refunded in full and its paid flag cleared in
    /// the same transaction that marks it canceled. The row is kept and its
    /// id is never reissued.
    pub async fn cancel(&self, session: &Session, rid: i64) -> Result<(), OpError> {
        let username = session
            .user()
            .ok_or(OpError::NotLoggedIn)?
            .to_string();

        let mut tx = self.db.begin_serializable().await?;

        let (paid, price) = ReservationStore::find_active(&mut tx, rid, &username)
            .await?
            .ok_or(OpError::NotCancelable(rid))?;

        if paid {
            let balance = UserStore::balance(&mut tx, &username)
                .await?
                .ok_or_else(|| OpError::Store("reservation owner has no user row".into()))?;
            UserStore::set_balance(&mut tx, &username, balance + price).await?;
            ReservationStore::set_paid(&mut tx, rid, false).await?;
        }
        ReservationStore::mark_canceled(&mut tx, rid).await?;

        tx.commit().await?;

        info!(rid, username = %username, refunded = paid, "canceled reservation");
        Ok(())
    }
}
