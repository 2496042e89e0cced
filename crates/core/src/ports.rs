//! Collaborator seams for the directive dispatcher.
//!
//! The dispatcher never owns storage: it reads accommodation records through a
//! [`CatalogSource`] and hands validated bookings to a [`BookingSink`]. Both are
//! called once per dispatch, without retries or timeouts.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::accommodation::AccommodationRecord;
use crate::domain::booking::BookingSubmission;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    #[error("catalog could not be decoded: {0}")]
    Decode(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("booking could not be stored: {0}")]
pub struct BookingSinkError(pub String);

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<AccommodationRecord>, CatalogError>;
}

#[async_trait]
pub trait BookingSink: Send + Sync {
    async fn save_booking(&self, submission: BookingSubmission) -> Result<(), BookingSinkError>;
}

/// Catalog held in memory, in the order it was given.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    records: Vec<AccommodationRecord>,
}

impl StaticCatalog {
    pub fn new(records: Vec<AccommodationRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AccommodationRecord] {
        &self.records
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_catalog(&self) -> Result<Vec<AccommodationRecord>, CatalogError> {
        Ok(self.records.clone())
    }
}
