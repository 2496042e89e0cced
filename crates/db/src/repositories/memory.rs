use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use staybot_core::domain::booking::{
    Booking, BookingId, BookingStatus, BookingSubmission, NewBooking,
};
use staybot_core::ports::{BookingSink, BookingSinkError};

use super::{BookingRepository, RepositoryError};

/// Booking store for tests and database-less runs. Ids are assigned
/// sequentially from 1, like an autoincrement column.
#[derive(Default)]
pub struct InMemoryBookingRepository {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    bookings: BTreeMap<i64, Booking>,
}

impl InMemoryBookingRepository {
    async fn select(&self, predicate: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        let state = self.state.read().await;
        state.bookings.values().filter(|booking| predicate(booking)).cloned().collect()
    }
}

#[async_trait::async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, booking: NewBooking) -> Result<Booking, RepositoryError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let stored = booking.into_booking(BookingId(state.next_id), Utc::now());
        state.bookings.insert(stored.id.0, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.bookings.get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, RepositoryError> {
        Ok(self.select(|_| true).await)
    }

    async fn list_by_status(&self, status: BookingStatus) -> Result<Vec<Booking>, RepositoryError> {
        Ok(self.select(|booking| booking.status == status).await)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Booking>, RepositoryError> {
        Ok(self.select(|booking| booking.user_id == Some(user_id)).await)
    }

    async fn list_by_customer(
        &self,
        customer_name: &str,
        phone_number: &str,
    ) -> Result<Vec<Booking>, RepositoryError> {
        Ok(self
            .select(|booking| {
                booking.customer_name == customer_name && booking.phone_number == phone_number
            })
            .await)
    }

    async fn update(&self, booking: &Booking) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        match state.bookings.get_mut(&booking.id.0) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = Booking { created_at, ..booking.clone() };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: BookingId) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        Ok(state.bookings.remove(&id.0).is_some())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.bookings.len() as u64)
    }
}

#[async_trait::async_trait]
impl BookingSink for InMemoryBookingRepository {
    async fn save_booking(&self, submission: BookingSubmission) -> Result<(), BookingSinkError> {
        self.create(NewBooking::from(submission))
            .await
            .map(|_| ())
            .map_err(|error| BookingSinkError(error.to_string()))
    }
}
