use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use innkeeper_core::{BookingId, DomainError, DomainResult, Entity, GuestId, RoomNumber};

use crate::stay::StayPeriod;

/// Booking status lifecycle.
///
/// `Confirmed → Cancelled` and `Confirmed → Completed`; both targets are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn display_name(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, BookingStatus::Confirmed)
    }
}

impl core::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A guest's stay in one room.
///
/// `total_cost` is fixed at creation. `refund_amount` stays zero unless the
/// booking is cancelled; only [`Booking::cancel`] and [`Booking::complete`]
/// mutate a booking after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    booking_id: BookingId,
    guest_id: GuestId,
    room_number: RoomNumber,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    status: BookingStatus,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision", default)]
    refund_amount: Decimal,
}

impl Booking {
    /// A freshly created, confirmed booking.
    pub fn confirmed(
        booking_id: BookingId,
        guest_id: GuestId,
        room_number: RoomNumber,
        stay: StayPeriod,
        total_cost: Decimal,
    ) -> Self {
        Self {
            booking_id,
            guest_id,
            room_number,
            check_in_date: stay.check_in(),
            check_out_date: stay.check_out(),
            status: BookingStatus::Confirmed,
            total_cost,
            refund_amount: Decimal::ZERO,
        }
    }

    pub fn booking_id(&self) -> &BookingId {
        &self.booking_id
    }

    pub fn guest_id(&self) -> &GuestId {
        &self.guest_id
    }

    pub fn room_number(&self) -> &RoomNumber {
        &self.room_number
    }

    pub fn check_in_date(&self) -> NaiveDate {
        self.check_in_date
    }

    pub fn check_out_date(&self) -> NaiveDate {
        self.check_out_date
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    pub fn refund_amount(&self) -> Decimal {
        self.refund_amount
    }

    pub fn stay(&self) -> StayPeriod {
        StayPeriod::from_stored(self.check_in_date, self.check_out_date)
    }

    pub fn nights(&self) -> u32 {
        self.stay().nights()
    }

    /// Only confirmed bookings hold their room.
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Whether this booking holds `room` during any night of `stay`.
    pub fn blocks(&self, room: &RoomNumber, stay: &StayPeriod) -> bool {
        self.is_active() && &self.room_number == room && self.stay().overlaps(stay)
    }

    /// Transition `Confirmed → Cancelled`, recording the refund.
    pub fn cancel(&mut self, refund_amount: Decimal) -> DomainResult<()> {
        match self.status {
            BookingStatus::Cancelled => {
                return Err(DomainError::conflict("booking is already cancelled"));
            }
            BookingStatus::Completed => {
                return Err(DomainError::conflict("cannot cancel a completed booking"));
            }
            BookingStatus::Confirmed => {}
        }

        if refund_amount < Decimal::ZERO {
            return Err(DomainError::validation("refund amount cannot be negative"));
        }
        if refund_amount > self.total_cost {
            return Err(DomainError::invariant(
                "refund amount cannot exceed the booking's total cost",
            ));
        }

        self.status = BookingStatus::Cancelled;
        self.refund_amount = refund_amount;
        Ok(())
    }

    /// Transition `Confirmed → Completed` (guest checked out).
    pub fn complete(&mut self) -> DomainResult<()> {
        if self.status != BookingStatus::Confirmed {
            return Err(DomainError::conflict(
                "only confirmed bookings can be completed",
            ));
        }
        self.status = BookingStatus::Completed;
        Ok(())
    }
}

impl Entity for Booking {
    type Id = BookingId;

    fn id(&self) -> &Self::Id {
        &self.booking_id
    }
}
