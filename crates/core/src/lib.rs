pub mod config;
pub mod directive;
pub mod domain;
pub mod errors;
pub mod ports;

pub use directive::{
    DirectiveDispatcher, DirectiveError, DirectiveKind, DispatchResult, BOOKING_CONFIRMATION,
};
pub use domain::accommodation::{AccommodationId, AccommodationOption, AccommodationRecord};
pub use domain::booking::{Booking, BookingId, BookingStatus, BookingSubmission, NewBooking};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use ports::{BookingSink, BookingSinkError, CatalogError, CatalogSource, StaticCatalog};
