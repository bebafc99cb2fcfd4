use aerobook_store::{ReservationStore, UserStore};
use tracing::warn;

use crate::error::OpError;
use crate::BookingEngine;

impl BookingEngine {
    /// Wipes all reservations and users in one transaction, leaving flights
    /// untouched. The next booking after a wipe is issued rid 1.
    ///
    /// Test and provisioning hook only; there is no caller-facing message
    /// for it.
    pub async fn clear_tables(&self) -> Result<(), OpError> {
        let mut tx = self.db.begin_serializable().await?;
        ReservationStore::delete_all(&mut tx).await?;
        UserStore::delete_all(&mut tx).await?;
        tx.commit().await?;
        warn!("cleared users and reservations");
        Ok(())
    }
}
