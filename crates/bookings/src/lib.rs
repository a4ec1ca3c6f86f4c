//! Bookings domain module.
//!
//! This crate contains the booking lifecycle, stay intervals, pricing and refund
//! rules, implemented purely as deterministic domain logic (no IO, no storage).

pub mod booking;
pub mod pricing;
pub mod refund;
pub mod stay;

pub use booking::{Booking, BookingStatus};
pub use pricing::CostBreakdown;
pub use refund::RefundPolicy;
pub use stay::StayPeriod;
