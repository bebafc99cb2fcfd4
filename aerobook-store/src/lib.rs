pub mod app_config;
pub mod database;
pub mod flight_repo;
pub mod reservation_store;
pub mod user_store;

pub use database::DbClient;
pub use flight_repo::PostgresFlightRepository;
pub use reservation_store::ReservationStore;
pub use user_store::UserStore;
