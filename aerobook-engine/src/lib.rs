//! The booking engine: authenticate, search, book, pay, list, and cancel,
//! each executed as one serializable transaction against the store.
//!
//! The engine itself is stateless; callers own a [`Session`] and pass it
//! into every operation. Conflict detection between concurrent sessions is
//! delegated entirely to the store's serializable isolation — a serialization
//! abort surfaces as an ordinary operation failure and is never retried here.

use std::sync::Arc;

use aerobook_core::repository::FlightRepository;
use aerobook_store::{DbClient, PostgresFlightRepository};

pub mod error;
pub mod reply;
pub mod session;

mod admin;
mod auth;
mod bookings;
mod finance;
mod reservations;
mod search;

pub use error::{ErrorKind, OpError};
pub use reservations::ReservationView;
pub use session::Session;

pub struct BookingEngine {
    db: DbClient,
    flights: Arc<dyn FlightRepository>,
}

impl BookingEngine {
    pub fn new(db: DbClient, flights: Arc<dyn FlightRepository>) -> Self {
        Self { db, flights }
    }

    /// Wires the flight search against the same Postgres pool the
    /// transactional operations use.
    pub fn with_postgres_search(db: DbClient) -> Self {
        let flights = Arc::new(PostgresFlightRepository {
            pool: db.pool.clone(),
        });
        Self { db, flights }
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.db.pool
    }
}
