use aerobook_core::repository::BoxError;
use thiserror::Error;

/// Everything that can go wrong inside one engine operation.
///
/// Variants carry the data the caller-visible messages need; [`OpError::kind`]
/// collapses them into the coarse taxonomy callers use to decide whether a
/// retry could ever succeed.
#[derive(Debug, Error)]
pub enum OpError {
    #[error("no user is logged in")]
    NotLoggedIn,
    #[error("a user is already logged in")]
    AlreadyLoggedIn,
    #[error("credentials were rejected")]
    BadCredentials,
    #[error("initial balance {0} is negative")]
    NegativeBalance(i64),
    #[error("username is already taken")]
    DuplicateUser,
    #[error("no itinerary at position {0}")]
    NoSuchItinerary(usize),
    #[error("flight {0} has no seats left")]
    FlightFull(i32),
    #[error("user already holds a reservation on day {0}")]
    DuplicateDay(i32),
    #[error("flight {0} does not exist")]
    MissingFlight(i32),
    #[error("unpaid reservation {rid} not found for user {username}")]
    UnpaidNotFound { rid: i64, username: String },
    #[error("balance {balance} does not cover cost {cost}")]
    InsufficientBalance { balance: i64, cost: i64 },
    #[error("reservation {0} cannot be canceled")]
    NotCancelable(i64),
    #[error("serializable transaction aborted")]
    StoreConflict(#[source] sqlx::Error),
    #[error("store operation failed")]
    Store(#[source] BoxError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller violated a precondition; nothing was read or written.
    Validation,
    /// An invariant would have been violated; the transaction rolled back.
    Conflict,
    /// The referenced itinerary or reservation does not exist for this user.
    NotFound,
    /// The store aborted a serializable transaction; safe to retry.
    StoreConflict,
    /// Connection or transport failure.
    StoreUnavailable,
}

impl OpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OpError::NotLoggedIn
            | OpError::AlreadyLoggedIn
            | OpError::NegativeBalance(_) => ErrorKind::Validation,
            OpError::DuplicateUser
            | OpError::FlightFull(_)
            | OpError::DuplicateDay(_)
            | OpError::InsufficientBalance { .. } => ErrorKind::Conflict,
            OpError::BadCredentials
            | OpError::NoSuchItinerary(_)
            | OpError::MissingFlight(_)
            | OpError::UnpaidNotFound { .. }
            | OpError::NotCancelable(_) => ErrorKind::NotFound,
            OpError::StoreConflict(_) => ErrorKind::StoreConflict,
            OpError::Store(_) => ErrorKind::StoreUnavailable,
        }
    }
}

// Postgres signals a lost serialization race with SQLSTATE 40001 and a
// uniqueness conflict with 23505; everything else is treated as the store
// being unavailable.
impl From<sqlx::Error> for OpError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            match db.code().as_deref() {
                Some("40001") => return OpError::StoreConflict(err),
                Some("23505") => return OpError::DuplicateUser,
                _ => {}
            }
        }
        OpError::Store(Box::new(err))
    }
}
