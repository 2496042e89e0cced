pub mod catalog;
pub mod connection;
pub mod fixtures;
pub mod migrations;
pub mod repositories;

pub use catalog::FileCatalog;
pub use connection::{connect, connect_with_config, connect_with_settings, ping, DbPool};
pub use fixtures::{SampleBookings, SeedResult};
pub use repositories::{
    BookingRepository, InMemoryBookingRepository, RepositoryError, SqlBookingRepository,
};
