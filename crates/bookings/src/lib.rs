//! `cuehall-bookings` — table reservations.

pub mod booking;

pub use booking::{Booking, BookingStatus};
