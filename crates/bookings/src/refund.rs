//! Cancellation refund rules.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::booking::Booking;

/// Refund policy applied when a booking is cancelled.
///
/// Selected by the hotel's configured policy name, except that non-refundable
/// rooms always use [`RefundPolicy::NoRefund`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefundPolicy {
    /// Nothing is returned.
    NoRefund,
    /// The whole booking cost is returned.
    FullRefund,
    /// 100% from 7 days out, 50% from 3 days out, nothing later.
    #[default]
    Tiered,
}

impl RefundPolicy {
    /// Days before check-in from which the full cost is refunded.
    pub const FULL_REFUND_DAYS: i64 = 7;
    /// Days before check-in from which half the cost is refunded.
    pub const PARTIAL_REFUND_DAYS: i64 = 3;

    /// Resolve a configured policy name (`FULL`, `NONE`, `TIERED`, any case).
    ///
    /// Unrecognized names fall back to [`RefundPolicy::Tiered`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "FULL" => RefundPolicy::FullRefund,
            "NONE" => RefundPolicy::NoRefund,
            _ => RefundPolicy::Tiered,
        }
    }

    /// Policy for a booking's room. `room_refundable` is `None` when the room
    /// record no longer exists, which is treated like a non-refundable room.
    pub fn for_room(room_refundable: Option<bool>, configured: RefundPolicy) -> Self {
        match room_refundable {
            Some(true) => configured,
            Some(false) | None => RefundPolicy::NoRefund,
        }
    }

    /// Configuration name of this policy.
    pub fn name(self) -> &'static str {
        match self {
            RefundPolicy::NoRefund => "NONE",
            RefundPolicy::FullRefund => "FULL",
            RefundPolicy::Tiered => "TIERED",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RefundPolicy::NoRefund => {
                "Non-refundable - no refund will be provided for cancellations."
            }
            RefundPolicy::FullRefund => {
                "Full refund - 100% of the booking cost will be refunded."
            }
            RefundPolicy::Tiered => {
                "Tiered refund: 100% if cancelled 7+ days before, 50% if 3-6 days before, no refund if less than 3 days."
            }
        }
    }

    /// Share of the total cost returned when cancelling `days_until_check_in`
    /// days ahead. Boundaries belong to the higher tier.
    pub fn refund_fraction(self, days_until_check_in: i64) -> Decimal {
        match self {
            RefundPolicy::NoRefund => Decimal::ZERO,
            RefundPolicy::FullRefund => Decimal::ONE,
            RefundPolicy::Tiered => {
                if days_until_check_in >= Self::FULL_REFUND_DAYS {
                    Decimal::ONE
                } else if days_until_check_in >= Self::PARTIAL_REFUND_DAYS {
                    Decimal::new(50, 2)
                } else {
                    Decimal::ZERO
                }
            }
        }
    }

    /// Refund owed for cancelling `booking` on `cancellation_date`.
    pub fn refund_for(self, booking: &Booking, cancellation_date: NaiveDate) -> Decimal {
        let days = (booking.check_in_date() - cancellation_date).num_days();
        booking.total_cost() * self.refund_fraction(days)
    }
}

impl core::fmt::Display for RefundPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
