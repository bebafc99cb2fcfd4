use aerobook_store::UserStore;
use tracing::info;

use crate::error::OpError;
use crate::session::Session;
use crate::BookingEngine;

impl BookingEngine {
    /// Creates a user account with a non-negative starting balance.
    pub async fn create_customer(
        &self,
        username: &str,
        password: &str,
        init_balance: i64,
    ) -> Result<(), OpError> {
        if init_balance < 0 {
            return Err(OpError::NegativeBalance(init_balance));
        }

        let mut tx = self.db.begin_serializable().await?;
        UserStore::insert(&mut tx, username, password, init_balance).await?;
        tx.commit().await?;

        info!(username, "created user");
        Ok(())
    }

    /// Verifies credentials and binds the identity to the session.
    ///
    /// A session holds at most one identity; logging in over an existing one
    /// is rejected without altering any state.
    pub async fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<(), OpError> {
        if session.user().is_some() {
            return Err(OpError::AlreadyLoggedIn);
        }

        let mut tx = self.db.begin_serializable().await?;
        let ok = UserStore::credentials_match(&mut tx, username, password).await?;
        tx.commit().await?;

        if !ok {
            return Err(OpError::BadCredentials);
        }

        session.set_user(username.to_string());
        info!(username, "logged in");
        Ok(())
    }
}
