pub mod accommodation;
pub mod booking;
