use aerobook_store::{ReservationStore, UserStore};
use tracing::info;

use crate::error::OpError;
use crate::session::Session;
use crate::BookingEngine;

impl BookingEngine {
    /// Pays for an unpaid reservation owned by the session's user, deducting
    /// exactly its total price. Returns the remaining balance.
    pub async fn pay(&self, session: &Session, rid: i64) -> Result<i64, OpError> {
        let username = session
            .user()
            .ok_or(OpError::NotLoggedIn)?
            .to_string();

        let mut tx = self.db.begin_serializable().await?;

        let not_found = || OpError::UnpaidNotFound {
            rid,
            username: username.clone(),
        };
        let (paid, price) = ReservationStore::find_active(&mut tx, rid, &username)
            .await?
            .ok_or_else(not_found)?;
        if paid {
            return Err(not_found());
        }

        let balance = UserStore::balance(&mut tx, &username)
            .await?
            .ok_or_else(|| OpError::Store("reservation owner has no user row".into()))?;
        if balance < price {
            return Err(OpError::InsufficientBalance {
                balance,
                cost: price,
            });
        }

        let remaining = balance - price;
        UserStore::set_balance(&mut tx, &username, remaining).await?;
        ReservationStore::set_paid(&mut tx, rid, true).await?;

        tx.commit().await?;

        info!(rid, username = %username, remaining, "paid reservation");
        Ok(remaining)
    }
}
