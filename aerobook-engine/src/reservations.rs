use aerobook_core::Flight;
use aerobook_store::ReservationStore;

use crate::error::OpError;
use crate::session::Session;
use crate::BookingEngine;

/// A reservation joined with its constituent flights, as shown to the caller.
#[derive(Debug, Clone)]
pub struct ReservationView {
    pub rid: i64,
    pub paid: bool,
    pub flights: Vec<Flight>,
}

impl BookingEngine {
    /// Returns every non-canceled reservation owned by the session's user,
    /// with flight details, in ascending rid order. An empty list means the
    /// user simply has no reservations; it is not a failure.
    pub async fn list_reservations(
        &self,
        session: &Session,
    ) -> Result<Vec<ReservationView>, OpError> {
        let username = session
            .user()
            .ok_or(OpError::NotLoggedIn)?
            .to_string();

        let mut tx = self.db.begin_serializable().await?;

        let reservations = ReservationStore::list_for_user(&mut tx, &username).await?;
        let mut views = Vec::with_capacity(reservations.len());
        for r in reservations {
            let mut flights = Vec::with_capacity(2);
            flights.push(
                ReservationStore::flight(&mut tx, r.fid1)
                    .await?
                    .ok_or(OpError::MissingFlight(r.fid1))?,
            );
            if let Some(fid2) = r.fid2 {
                flights.push(
                    ReservationStore::flight(&mut tx, fid2)
                        .await?
                        .ok_or(OpError::MissingFlight(fid2))?,
                );
            }
            views.push(ReservationView {
                rid: r.rid,
                paid: r.paid,
                flights,
            });
        }

        tx.commit().await?;
        Ok(views)
    }
}
