pub mod flight;
pub mod format;
pub mod itinerary;
pub mod repository;
pub mod reservation;
pub mod search;

pub use flight::Flight;
pub use itinerary::Itinerary;
pub use reservation::{Reservation, User};
