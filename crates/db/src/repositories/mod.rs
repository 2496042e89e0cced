use async_trait::async_trait;
use thiserror::Error;

use staybot_core::domain::booking::{Booking, BookingId, BookingStatus, NewBooking};

pub mod booking;
pub mod memory;

pub use booking::SqlBookingRepository;
pub use memory::InMemoryBookingRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: NewBooking) -> Result<Booking, RepositoryError>;
    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError>;
    async fn list_all(&self) -> Result<Vec<Booking>, RepositoryError>;
    async fn list_by_status(&self, status: BookingStatus) -> Result<Vec<Booking>, RepositoryError>;
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Booking>, RepositoryError>;
    async fn list_by_customer(
        &self,
        customer_name: &str,
        phone_number: &str,
    ) -> Result<Vec<Booking>, RepositoryError>;
    /// Replaces every mutable column. Returns `false` when no row has `booking.id`.
    async fn update(&self, booking: &Booking) -> Result<bool, RepositoryError>;
    async fn delete(&self, id: BookingId) -> Result<bool, RepositoryError>;
    async fn count(&self) -> Result<u64, RepositoryError>;
}
