//! Guests domain module.
//!
//! Guest records are referenced by bookings through their id only.

pub mod guest;

pub use guest::Guest;
