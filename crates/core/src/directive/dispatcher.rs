use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::payload::{self, PayloadError};
use super::ranker::{self, Ranking};
use super::scanner;
use super::validator::{self, BookingRule};
use super::DirectiveKind;
use crate::domain::accommodation::AccommodationOption;
use crate::ports::{BookingSink, CatalogSource};

pub const BOOKING_CONFIRMATION: &str = "Thank you! Your booking is now pending confirmation from our receptionist. We'll contact you shortly about the payment.";

pub fn no_availability_message(guests: i64) -> String {
    format!(
        "I'm sorry, but we don't have any houses available for {guests} guests at the moment. \
         Would you like to try a different number of guests?"
    )
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DirectiveError {
    #[error(transparent)]
    PayloadMalformed(#[from] PayloadError),
    #[error("invalid booking data: {0}")]
    ValidationFailed(#[from] BookingRule),
    #[error("failed to retrieve houses: {0}")]
    CatalogUnavailable(String),
    #[error("failed to save booking: {0}")]
    PersistenceFailed(String),
}

impl DirectiveError {
    /// Whether the fault lies with the directive content rather than a
    /// collaborator.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::PayloadMalformed(_) | Self::ValidationFailed(_))
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::PayloadMalformed(_) => "payload_malformed",
            Self::ValidationFailed(rule) => rule.code(),
            Self::CatalogUnavailable(_) => "catalog_unavailable",
            Self::PersistenceFailed(_) => "persistence_failed",
        }
    }
}

/// Outcome of dispatching one reply. Exactly one variant is produced per call.
#[derive(Clone, Debug, PartialEq)]
pub enum DispatchResult {
    Options(Vec<AccommodationOption>),
    Message(String),
    Error(DirectiveError),
    NoDirective,
}

impl DispatchResult {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Options(_) => "options",
            Self::Message(_) => "message",
            Self::Error(_) => "error",
            Self::NoDirective => "no_directive",
        }
    }
}

impl From<DirectiveError> for DispatchResult {
    fn from(error: DirectiveError) -> Self {
        Self::Error(error)
    }
}

/// Stateless: each call reads the catalog or writes a booking at most once
/// and shares nothing with concurrent calls.
#[derive(Clone)]
pub struct DirectiveDispatcher {
    catalog: Arc<dyn CatalogSource>,
    bookings: Arc<dyn BookingSink>,
}

impl DirectiveDispatcher {
    pub fn new(catalog: Arc<dyn CatalogSource>, bookings: Arc<dyn BookingSink>) -> Self {
        Self { catalog, bookings }
    }

    pub async fn scan_and_dispatch(&self, reply: &str) -> DispatchResult {
        if !scanner::contains_directive(reply) {
            return DispatchResult::NoDirective;
        }

        let Some((kind, block)) = scanner::detect(reply) else {
            debug!(
                event_name = "directive.scan.incomplete",
                "opening tag present without a matching closing tag"
            );
            return DispatchResult::NoDirective;
        };

        debug!(event_name = "directive.scan.detected", directive = kind.as_str(), "directive detected");

        let result = match kind {
            DirectiveKind::AccommodationQuery => self.dispatch_accommodation_query(block).await,
            DirectiveKind::BookingSubmission => self.dispatch_booking_submission(block).await,
            DirectiveKind::None => Ok(DispatchResult::NoDirective),
        };

        result.unwrap_or_else(|failure| {
            if failure.is_client_error() {
                warn!(
                    event_name = "directive.dispatch.rejected",
                    directive = kind.as_str(),
                    error_code = failure.code(),
                    error = %failure,
                    "directive rejected"
                );
            } else {
                error!(
                    event_name = "directive.dispatch.failed",
                    directive = kind.as_str(),
                    error_code = failure.code(),
                    error = %failure,
                    "directive could not be completed"
                );
            }
            DispatchResult::Error(failure)
        })
    }

    async fn dispatch_accommodation_query(
        &self,
        block: &str,
    ) -> Result<DispatchResult, DirectiveError> {
        let query = payload::decode_accommodation_query(block)?;
        let catalog = self
            .catalog
            .fetch_catalog()
            .await
            .map_err(|error| DirectiveError::CatalogUnavailable(error.to_string()))?;

        match ranker::rank(&catalog, query.guests) {
            Ranking::Ranked(options) => {
                info!(
                    event_name = "directive.houses.ranked",
                    guests = query.guests,
                    matches = options.len(),
                    "accommodation options ranked"
                );
                Ok(DispatchResult::Options(options))
            }
            Ranking::NoMatch { guests } => {
                info!(event_name = "directive.houses.none", guests, "no accommodation seats party");
                Ok(DispatchResult::Message(no_availability_message(guests)))
            }
        }
    }

    async fn dispatch_booking_submission(
        &self,
        block: &str,
    ) -> Result<DispatchResult, DirectiveError> {
        let submission = payload::decode_booking_submission(block)?;
        validator::validate(&submission)?;

        self.bookings
            .save_booking(submission)
            .await
            .map_err(|error| DirectiveError::PersistenceFailed(error.to_string()))?;

        info!(event_name = "directive.booking.saved", "booking submission persisted");
        Ok(DispatchResult::Message(BOOKING_CONFIRMATION.to_string()))
    }
}
