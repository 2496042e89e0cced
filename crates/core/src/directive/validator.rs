use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::domain::booking::BookingSubmission;

/// Business rules for a booking submission, in the order they are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingRule {
    #[error("resort name is required")]
    ResortNameMissing,
    #[error("check-in date must be a calendar date in YYYY-MM-DD format")]
    CheckInInvalid,
    #[error("number of guests must be at least 1")]
    GuestsBelowMinimum,
    #[error("customer name is required")]
    CustomerNameMissing,
    #[error("phone number is required")]
    PhoneNumberMissing,
}

impl BookingRule {
    pub const ORDER: [BookingRule; 5] = [
        BookingRule::ResortNameMissing,
        BookingRule::CheckInInvalid,
        BookingRule::GuestsBelowMinimum,
        BookingRule::CustomerNameMissing,
        BookingRule::PhoneNumberMissing,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::ResortNameMissing => "resort_name_required",
            Self::CheckInInvalid => "check_in_invalid",
            Self::GuestsBelowMinimum => "guests_below_minimum",
            Self::CustomerNameMissing => "customer_name_required",
            Self::PhoneNumberMissing => "phone_number_required",
        }
    }

    fn is_violated_by(&self, submission: &BookingSubmission) -> bool {
        match self {
            Self::ResortNameMissing => is_blank(&submission.resort_name),
            Self::CheckInInvalid => !is_calendar_date(&submission.check_in),
            Self::GuestsBelowMinimum => submission.guests < 1,
            Self::CustomerNameMissing => is_blank(&submission.customer_name),
            Self::PhoneNumberMissing => is_blank(&submission.phone_number),
        }
    }
}

/// Returns the first violated rule. Check-out date and total price are
/// deliberately unchecked: empty and zero mean "not settled yet".
pub fn validate(submission: &BookingSubmission) -> Result<(), BookingRule> {
    match BookingRule::ORDER.into_iter().find(|rule| rule.is_violated_by(submission)) {
        Some(rule) => Err(rule),
        None => Ok(()),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Strict `YYYY-MM-DD` that names a real day. Whether the day is in the past
/// is not this check's concern.
pub fn is_calendar_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        });

    shaped && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
