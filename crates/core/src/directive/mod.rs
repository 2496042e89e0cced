//! Embedded directive protocol.
//!
//! The assistant model answers in free text, but when it wants the backend to
//! act it embeds a tagged JSON block in its reply:
//!
//! ```text
//! <HOUSE_LIST_DATA>{"guests": 2}</HOUSE_LIST_DATA>
//! <BOOKING_DATA>{"resort_name": "Pool Villa", ...}</BOOKING_DATA>
//! ```
//!
//! Processing is one-way: [`scanner`] finds the block, [`payload`] decodes it,
//! then either [`ranker`] orders catalog matches or [`validator`] checks a
//! booking before it is persisted. [`dispatcher`] runs the whole pipeline and
//! produces exactly one [`DispatchResult`] per reply.

pub mod dispatcher;
pub mod payload;
pub mod ranker;
pub mod scanner;
pub mod validator;

use serde::Serialize;

pub use dispatcher::{
    no_availability_message, DirectiveDispatcher, DirectiveError, DispatchResult,
    BOOKING_CONFIRMATION,
};
pub use payload::{AccommodationQuery, PayloadError};
pub use ranker::Ranking;
pub use validator::BookingRule;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    AccommodationQuery,
    BookingSubmission,
    None,
}

impl DirectiveKind {
    /// Recognized directives in dispatch priority order.
    pub const RECOGNIZED: [DirectiveKind; 2] =
        [DirectiveKind::AccommodationQuery, DirectiveKind::BookingSubmission];

    pub fn tag_name(&self) -> Option<&'static str> {
        match self {
            Self::AccommodationQuery => Some("HOUSE_LIST_DATA"),
            Self::BookingSubmission => Some("BOOKING_DATA"),
            Self::None => None,
        }
    }

    pub fn opening_tag(&self) -> Option<&'static str> {
        match self {
            Self::AccommodationQuery => Some("<HOUSE_LIST_DATA>"),
            Self::BookingSubmission => Some("<BOOKING_DATA>"),
            Self::None => None,
        }
    }

    pub fn closing_tag(&self) -> Option<&'static str> {
        match self {
            Self::AccommodationQuery => Some("</HOUSE_LIST_DATA>"),
            Self::BookingSubmission => Some("</BOOKING_DATA>"),
            Self::None => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccommodationQuery => "accommodation_query",
            Self::BookingSubmission => "booking_submission",
            Self::None => "none",
        }
    }
}
