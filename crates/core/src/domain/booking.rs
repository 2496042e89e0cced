use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub i64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Paid,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::InvalidBookingStatus(other.to_string())),
        }
    }
}

/// Booking details captured by the assistant at the end of a conversation.
///
/// `check_out` may be empty and `total_price` may be zero: both mean the value
/// has not been settled yet and are filled in later by staff.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingSubmission {
    pub resort_name: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: i64,
    pub total_price: f64,
    pub customer_name: String,
    pub phone_number: String,
}

impl BookingSubmission {
    pub const UNPRICED: f64 = 0.0;

    /// Builds a submission from its required fields. `check_out` starts empty
    /// and `total_price` starts at [`Self::UNPRICED`].
    pub fn new(
        resort_name: impl Into<String>,
        check_in: impl Into<String>,
        guests: i64,
        customer_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            resort_name: resort_name.into(),
            check_in: check_in.into(),
            check_out: String::new(),
            guests,
            total_price: Self::UNPRICED,
            customer_name: customer_name.into(),
            phone_number: phone_number.into(),
        }
    }

    pub fn with_check_out(mut self, check_out: impl Into<String>) -> Self {
        self.check_out = check_out.into();
        self
    }

    pub fn with_total_price(mut self, total_price: f64) -> Self {
        self.total_price = total_price;
        self
    }

    pub fn is_priced(&self) -> bool {
        self.total_price != Self::UNPRICED
    }
}

/// A stored reservation row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: Option<i64>,
    pub resort_name: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: i64,
    pub total_price: f64,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    pub customer_name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a booking that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub user_id: Option<i64>,
    pub resort_name: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: i64,
    pub total_price: f64,
    pub status: BookingStatus,
    pub payment_date: Option<String>,
    pub customer_name: String,
    pub phone_number: String,
}

impl From<BookingSubmission> for NewBooking {
    fn from(submission: BookingSubmission) -> Self {
        Self {
            user_id: None,
            resort_name: submission.resort_name,
            check_in: submission.check_in,
            check_out: submission.check_out,
            guests: submission.guests,
            total_price: submission.total_price,
            status: BookingStatus::Pending,
            payment_date: None,
            customer_name: submission.customer_name,
            phone_number: submission.phone_number,
        }
    }
}

impl NewBooking {
    pub fn into_booking(self, id: BookingId, created_at: DateTime<Utc>) -> Booking {
        Booking {
            id,
            user_id: self.user_id,
            resort_name: self.resort_name,
            check_in: self.check_in,
            check_out: self.check_out,
            guests: self.guests,
            total_price: self.total_price,
            status: self.status,
            payment_date: self.payment_date,
            customer_name: self.customer_name,
            phone_number: self.phone_number,
            created_at,
        }
    }
}
