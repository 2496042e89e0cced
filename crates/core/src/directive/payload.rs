use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{scanner, DirectiveKind};
use crate::domain::booking::BookingSubmission;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{} payload is malformed: {reason}", .kind.as_str())]
pub struct PayloadError {
    pub kind: DirectiveKind,
    pub reason: String,
}

impl PayloadError {
    fn new(kind: DirectiveKind, reason: impl Into<String>) -> Self {
        Self { kind, reason: reason.into() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccommodationQuery {
    pub guests: i64,
}

/// Booking fields as the model writes them. Every field may be absent so
/// that missing values surface as named validation failures, not as decode
/// errors; only syntax and type mismatches are rejected here.
#[derive(Debug, Deserialize)]
struct BookingPayload {
    #[serde(default)]
    resort_name: Option<String>,
    #[serde(default)]
    check_in: Option<String>,
    #[serde(default)]
    check_out: Option<String>,
    #[serde(default)]
    guests: Option<i64>,
    #[serde(default)]
    total_price: Option<f64>,
    #[serde(default)]
    customer_name: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
}

impl From<BookingPayload> for BookingSubmission {
    fn from(payload: BookingPayload) -> Self {
        let mut submission = BookingSubmission::new(
            payload.resort_name.unwrap_or_default(),
            payload.check_in.unwrap_or_default(),
            payload.guests.unwrap_or_default(),
            payload.customer_name.unwrap_or_default(),
            payload.phone_number.unwrap_or_default(),
        );
        if let Some(check_out) = payload.check_out {
            submission = submission.with_check_out(check_out);
        }
        if let Some(total_price) = payload.total_price {
            submission = submission.with_total_price(total_price);
        }
        submission
    }
}

/// Payloads must be JSON objects. serde would otherwise map arrays onto
/// struct fields by position.
fn decode_object<T: DeserializeOwned>(raw: &str, kind: DirectiveKind) -> Result<T, PayloadError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|error| PayloadError::new(kind, error.to_string()))?;
    if !value.is_object() {
        return Err(PayloadError::new(kind, "expected a JSON object"));
    }
    serde_json::from_value(value).map_err(|error| PayloadError::new(kind, error.to_string()))
}

pub fn decode_accommodation_query(raw: &str) -> Result<AccommodationQuery, PayloadError> {
    decode_object(raw, DirectiveKind::AccommodationQuery)
}

pub fn decode_booking_submission(raw: &str) -> Result<BookingSubmission, PayloadError> {
    decode_object::<BookingPayload>(raw, DirectiveKind::BookingSubmission)
        .map(BookingSubmission::from)
}

/// `Ok(None)` when the reply carries no complete accommodation-query block.
pub fn read_accommodation_query(text: &str) -> Result<Option<AccommodationQuery>, PayloadError> {
    scanner::extract_directive(text, DirectiveKind::AccommodationQuery)
        .map(decode_accommodation_query)
        .transpose()
}

/// `Ok(None)` when the reply carries no complete booking block.
pub fn read_booking_submission(text: &str) -> Result<Option<BookingSubmission>, PayloadError> {
    scanner::extract_directive(text, DirectiveKind::BookingSubmission)
        .map(decode_booking_submission)
        .transpose()
}
