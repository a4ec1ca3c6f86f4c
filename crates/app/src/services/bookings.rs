//! Booking lifecycle orchestration.
//!
//! Each operation validates against current state, then writes the Booking
//! collection and afterwards the Room collection. The two writes are not atomic:
//! if the second fails the first stays persisted and the error is returned.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use innkeeper_bookings::{Booking, CostBreakdown, RefundPolicy, StayPeriod};
use innkeeper_core::{BookingId, Clock, DomainError, DomainResult, GuestId, RoomNumber};
use innkeeper_guests::Guest;
use innkeeper_infra::{HotelSettings, RecordStore, SharedStore};
use innkeeper_rooms::Room;

use crate::error::ServiceResult;
use crate::services::rooms::RoomCatalog;

/// Creates, cancels and completes bookings.
///
/// Invariant maintained for every room: its confirmed bookings have pairwise
/// disjoint `[check_in, check_out)` stays. Assumes a single writer.
#[derive(Clone)]
pub struct BookingEngine {
    bookings: SharedStore<BookingId, Booking>,
    guests: SharedStore<GuestId, Guest>,
    rooms: RoomCatalog,
    settings: Arc<HotelSettings>,
    clock: Arc<dyn Clock>,
}

impl BookingEngine {
    pub fn new(
        bookings: SharedStore<BookingId, Booking>,
        guests: SharedStore<GuestId, Guest>,
        rooms: RoomCatalog,
        settings: Arc<HotelSettings>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bookings,
            guests,
            rooms,
            settings,
            clock,
        }
    }

    /// Book `room_number` for `guest_id` over `[check_in, check_out)`.
    ///
    /// Fails without mutating anything when the dates are invalid, the guest or
    /// room does not exist, the room is flagged unavailable, or a confirmed
    /// booking on the room overlaps the stay.
    pub fn create(
        &self,
        guest_id: &GuestId,
        room_number: &RoomNumber,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> ServiceResult<Booking> {
        if check_in < self.clock.today() {
            return Err(DomainError::validation("check-in date cannot be in the past").into());
        }
        let stay = StayPeriod::new(check_in, check_out)?;

        if !self.guests.exists_by_id(guest_id)? {
            return Err(DomainError::not_found(format!("guest {guest_id}")).into());
        }

        let room = self
            .rooms
            .find_by_room_number(room_number)?
            .ok_or_else(|| DomainError::not_found(format!("room {room_number}")))?;
        if !room.is_available() {
            return Err(
                DomainError::conflict(format!("room {room_number} is not available")).into(),
            );
        }

        if !self.rooms.is_free_for_stay(room_number, &stay)? {
            return Err(DomainError::conflict(format!(
                "room {room_number} has conflicting bookings for these dates"
            ))
            .into());
        }

        let cost = self.quote_stay(&room, &stay)?;
        let booking = Booking::confirmed(
            BookingId::generate(),
            guest_id.clone(),
            room_number.clone(),
            stay,
            cost.total,
        );

        let booking = self.bookings.save(booking)?;
        self.rooms.set_availability(room_number, false)?;

        tracing::info!(
            "booking {} confirmed: room {} for guest {}, {} to {} ({} nights, total {})",
            booking.booking_id(),
            room_number,
            guest_id,
            check_in,
            check_out,
            cost.nights,
            cost.total
        );
        Ok(booking)
    }

    /// Cancel a confirmed booking, refunding per the room's policy as of today.
    pub fn cancel(&self, booking_id: &BookingId) -> ServiceResult<Booking> {
        let mut booking = self.require(booking_id)?;

        let room = self.rooms.find_by_room_number(booking.room_number())?;
        let policy = RefundPolicy::for_room(
            room.as_ref().map(Room::is_refundable),
            self.settings.refund_policy(),
        );
        let refund = policy.refund_for(&booking, self.clock.today());

        booking.cancel(refund)?;
        let booking = self.bookings.save(booking)?;
        self.release_room(&booking, room.is_some())?;

        tracing::info!(
            "booking {} cancelled under {} policy, refund {}",
            booking_id,
            policy,
            refund
        );
        Ok(booking)
    }

    /// Mark a confirmed booking as completed (guest checked out).
    pub fn complete(&self, booking_id: &BookingId) -> ServiceResult<Booking> {
        let mut booking = self.require(booking_id)?;
        booking.complete()?;

        let room_exists = self
            .rooms
            .find_by_room_number(booking.room_number())?
            .is_some();
        let booking = self.bookings.save(booking)?;
        self.release_room(&booking, room_exists)?;

        tracing::info!("booking {} completed", booking_id);
        Ok(booking)
    }

    /// Price `room` for `[check_in, check_out)` at the configured VAT rate.
    pub fn quote(
        &self,
        room: &Room,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> ServiceResult<CostBreakdown> {
        let stay = StayPeriod::new(check_in, check_out)?;
        Ok(self.quote_stay(room, &stay)?)
    }

    pub fn calculate_total_cost(
        &self,
        room: &Room,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> ServiceResult<Decimal> {
        Ok(self.quote(room, check_in, check_out)?.total)
    }

    pub fn calculate_subtotal(
        &self,
        room: &Room,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> ServiceResult<Decimal> {
        Ok(self.quote(room, check_in, check_out)?.subtotal)
    }

    pub(crate) fn quote_stay(&self, room: &Room, stay: &StayPeriod) -> DomainResult<CostBreakdown> {
        CostBreakdown::compute(stay, room.price_per_night(), self.settings.vat_rate())
    }

    pub fn all_bookings(&self) -> ServiceResult<Vec<Booking>> {
        Ok(self.bookings.find_all()?)
    }

    pub fn find_by_id(&self, booking_id: &BookingId) -> ServiceResult<Option<Booking>> {
        Ok(self.bookings.find_by_id(booking_id)?)
    }

    pub fn bookings_by_guest(&self, guest_id: &GuestId) -> ServiceResult<Vec<Booking>> {
        Ok(self
            .bookings
            .find_matching(&|b: &Booking| b.guest_id() == guest_id)?)
    }

    pub fn bookings_by_room(&self, room_number: &RoomNumber) -> ServiceResult<Vec<Booking>> {
        Ok(self
            .bookings
            .find_matching(&|b: &Booking| b.room_number() == room_number)?)
    }

    pub fn active_bookings(&self) -> ServiceResult<Vec<Booking>> {
        Ok(self.bookings.find_matching(&|b: &Booking| b.is_active())?)
    }

    pub fn active_booking_count(&self) -> ServiceResult<usize> {
        Ok(self.active_bookings()?.len())
    }

    /// Whether no confirmed booking on the room overlaps `[check_in, check_out)`.
    /// Ignores the room's availability flag.
    pub fn is_room_available_for_dates(
        &self,
        room_number: &RoomNumber,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> ServiceResult<bool> {
        let stay = StayPeriod::new(check_in, check_out)?;
        self.rooms.is_free_for_stay(room_number, &stay)
    }

    fn require(&self, booking_id: &BookingId) -> ServiceResult<Booking> {
        Ok(self
            .bookings
            .find_by_id(booking_id)?
            .ok_or_else(|| DomainError::not_found(format!("booking {booking_id}")))?)
    }

    fn release_room(&self, booking: &Booking, room_exists: bool) -> ServiceResult<()> {
        if room_exists {
            self.rooms.set_availability(booking.room_number(), true)?;
        } else {
            tracing::warn!(
                "room {} of booking {} no longer exists; nothing to release",
                booking.room_number(),
                booking.booking_id()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Fixture, date};
    use chrono::Days;
    use innkeeper_bookings::BookingStatus;
    use innkeeper_core::Entity;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn domain(err: crate::error::ServiceError) -> DomainError {
        err.as_domain().cloned().expect("expected a domain error")
    }

    #[test]
    fn created_booking_is_confirmed_with_vat_inclusive_total() {
        let fx = Fixture::new();
        let booking = fx.book(&fx.room_101, date(2031, 5, 10), date(2031, 5, 13));

        let stored = fx.ctx.bookings.find_by_id(booking.booking_id()).unwrap().unwrap();
        assert_eq!(stored.status(), BookingStatus::Confirmed);
        // 3 nights × 100 × 1.10
        assert_eq!(stored.total_cost(), dec!(330));
        assert_eq!(stored.refund_amount(), Decimal::ZERO);
        assert!(stored.booking_id().is_generated_shape());
        assert!(!fx.ctx.rooms.find_by_room_number(&fx.room_101).unwrap().unwrap().is_available());
    }

    #[test]
    fn checkout_not_after_checkin_is_rejected() {
        let fx = Fixture::new();
        for check_out in [date(2031, 5, 10), date(2031, 5, 9)] {
            let err = fx
                .ctx
                .bookings
                .create(&fx.guest, &fx.room_101, date(2031, 5, 10), check_out)
                .unwrap_err();
            assert!(matches!(domain(err), DomainError::Validation(_)));
        }
        assert!(fx.ctx.bookings.all_bookings().unwrap().is_empty());
        assert!(fx.ctx.rooms.find_by_room_number(&fx.room_101).unwrap().unwrap().is_available());
    }

    #[test]
    fn check_in_in_the_past_is_rejected_but_today_is_fine() {
        let fx = Fixture::new();
        let err = fx
            .ctx
            .bookings
            .create(&fx.guest, &fx.room_101, date(2031, 4, 30), date(2031, 5, 2))
            .unwrap_err();
        assert!(matches!(domain(err), DomainError::Validation(_)));

        fx.book(&fx.room_101, fx.today, date(2031, 5, 2));
    }

    #[test]
    fn unknown_guest_or_room_is_not_found() {
        let fx = Fixture::new();
        let err = fx
            .ctx
            .bookings
            .create(&"G-UNKNOWN0".parse().unwrap(), &fx.room_101, date(2031, 5, 10), date(2031, 5, 11))
            .unwrap_err();
        assert!(matches!(domain(err), DomainError::NotFound(_)));

        let err = fx
            .ctx
            .bookings
            .create(&fx.guest, &"999".parse().unwrap(), date(2031, 5, 10), date(2031, 5, 11))
            .unwrap_err();
        assert!(matches!(domain(err), DomainError::NotFound(_)));
        assert!(fx.ctx.bookings.all_bookings().unwrap().is_empty());
    }

    #[test]
    fn unavailable_room_is_a_conflict() {
        let fx = Fixture::new();
        fx.book(&fx.room_101, date(2031, 5, 10), date(2031, 5, 12));
        let err = fx
            .ctx
            .bookings
            .create(&fx.guest, &fx.room_101, date(2031, 6, 1), date(2031, 6, 3))
            .unwrap_err();
        assert!(matches!(domain(err), DomainError::Conflict(_)));
        assert_eq!(fx.ctx.bookings.all_bookings().unwrap().len(), 1);
    }

    #[test]
    fn overlapping_stay_is_a_conflict_even_when_flag_says_available() {
        let fx = Fixture::new();
        fx.book(&fx.room_101, date(2031, 5, 10), date(2031, 5, 14));
        fx.ctx.rooms.set_availability(&fx.room_101, true).unwrap();

        let err = fx
            .ctx
            .bookings
            .create(&fx.guest, &fx.room_101, date(2031, 5, 13), date(2031, 5, 15))
            .unwrap_err();
        assert!(matches!(domain(err), DomainError::Conflict(_)));

        // Back-to-back is not an overlap.
        fx.book(&fx.room_101, date(2031, 5, 14), date(2031, 5, 15));
        assert_eq!(fx.ctx.bookings.bookings_by_room(&fx.room_101).unwrap().len(), 2);
    }

    #[test]
    fn tiered_refund_tracks_lead_time() {
        for (lead, expected) in [(10u64, dec!(330)), (5, dec!(165)), (1, Decimal::ZERO)] {
            let fx = Fixture::new();
            let check_in = fx.today + Days::new(lead);
            let booking = fx.book(&fx.room_101, check_in, check_in + Days::new(3));
            assert_eq!(booking.total_cost(), dec!(330));

            let cancelled = fx.ctx.bookings.cancel(booking.booking_id()).unwrap();
            assert_eq!(cancelled.status(), BookingStatus::Cancelled);
            assert_eq!(cancelled.refund_amount(), expected, "lead time {lead}");
            assert!(fx.ctx.rooms.find_by_room_number(&fx.room_101).unwrap().unwrap().is_available());
        }
    }

    #[test]
    fn non_refundable_room_never_refunds() {
        let fx = Fixture::with_policy(RefundPolicy::FullRefund);
        let check_in = fx.today + Days::new(30);
        let booking = fx.book(&fx.room_201, check_in, check_in + Days::new(1));
        let cancelled = fx.ctx.bookings.cancel(booking.booking_id()).unwrap();
        assert_eq!(cancelled.refund_amount(), Decimal::ZERO);
    }

    #[test]
    fn configured_policy_applies_to_refundable_rooms() {
        let fx = Fixture::with_policy(RefundPolicy::FullRefund);
        let booking = fx.book(&fx.room_101, fx.today, fx.today + Days::new(2));
        let cancelled = fx.ctx.bookings.cancel(booking.booking_id()).unwrap();
        assert_eq!(cancelled.refund_amount(), cancelled.total_cost());

        let fx = Fixture::with_policy(RefundPolicy::NoRefund);
        let booking = fx.book(&fx.room_101, fx.today + Days::new(20), fx.today + Days::new(22));
        let cancelled = fx.ctx.bookings.cancel(booking.booking_id()).unwrap();
        assert_eq!(cancelled.refund_amount(), Decimal::ZERO);
    }

    #[test]
    fn terminal_bookings_cannot_transition_again() {
        let fx = Fixture::new();
        let a = fx.book(&fx.room_101, date(2031, 5, 10), date(2031, 5, 12));
        let b = fx.book(&fx.room_102, date(2031, 5, 10), date(2031, 5, 12));

        fx.ctx.bookings.cancel(a.booking_id()).unwrap();
        fx.ctx.bookings.complete(b.booking_id()).unwrap();

        for id in [a.booking_id(), b.booking_id()] {
            assert!(matches!(domain(fx.ctx.bookings.cancel(id).unwrap_err()), DomainError::Conflict(_)));
            assert!(matches!(domain(fx.ctx.bookings.complete(id).unwrap_err()), DomainError::Conflict(_)));
        }

        let missing: BookingId = "BK-MISSING0".parse().unwrap();
        assert!(matches!(domain(fx.ctx.bookings.cancel(&missing).unwrap_err()), DomainError::NotFound(_)));
        assert!(matches!(domain(fx.ctx.bookings.complete(&missing).unwrap_err()), DomainError::NotFound(_)));
    }

    #[test]
    fn completing_frees_the_room_and_keeps_refund_zero() {
        let fx = Fixture::new();
        let booking = fx.book(&fx.room_102, date(2031, 5, 10), date(2031, 5, 12));
        let done = fx.ctx.bookings.complete(booking.booking_id()).unwrap();
        assert_eq!(done.status(), BookingStatus::Completed);
        assert_eq!(done.refund_amount(), Decimal::ZERO);
        assert!(fx.ctx.rooms.find_by_room_number(&fx.room_102).unwrap().unwrap().is_available());
        assert_eq!(fx.ctx.bookings.active_booking_count().unwrap(), 0);
    }

    #[test]
    fn missing_room_falls_back_to_no_refund() {
        let fx = Fixture::new();
        let booking = fx.book(&fx.room_101, fx.today + Days::new(30), fx.today + Days::new(31));
        // Remove the room behind the catalog's back.
        fx.ctx.repositories.rooms.delete(&fx.room_101).unwrap();

        let cancelled = fx.ctx.bookings.cancel(booking.booking_id()).unwrap();
        assert_eq!(cancelled.status(), BookingStatus::Cancelled);
        assert_eq!(cancelled.refund_amount(), Decimal::ZERO);
        assert!(fx.ctx.rooms.find_by_room_number(&fx.room_101).unwrap().is_none());
    }

    #[test]
    fn queries_filter_by_guest_room_and_status() {
        let fx = Fixture::new();
        let other = fx.ctx.guests.add_guest("Alan Turing", "555-0111", "alan@example.com").unwrap();
        let a = fx.book(&fx.room_101, date(2031, 5, 10), date(2031, 5, 12));
        fx.ctx
            .bookings
            .create(other.id_typed(), &fx.room_102, date(2031, 5, 10), date(2031, 5, 12))
            .unwrap();
        fx.ctx.bookings.cancel(a.booking_id()).unwrap();

        assert_eq!(fx.ctx.bookings.all_bookings().unwrap().len(), 2);
        assert_eq!(fx.ctx.bookings.bookings_by_guest(&fx.guest).unwrap().len(), 1);
        assert_eq!(fx.ctx.bookings.bookings_by_guest(other.id_typed()).unwrap().len(), 1);
        assert_eq!(fx.ctx.bookings.bookings_by_room(&fx.room_101).unwrap().len(), 1);
        let active = fx.ctx.bookings.active_bookings().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].room_number(), &fx.room_102);
        assert!(!a.same_identity(&active[0]));
    }

    #[test]
    fn date_availability_ignores_cancelled_bookings() {
        let fx = Fixture::new();
        let booking = fx.book(&fx.room_101, date(2031, 5, 10), date(2031, 5, 14));
        let engine = &fx.ctx.bookings;

        assert!(!engine.is_room_available_for_dates(&fx.room_101, date(2031, 5, 13), date(2031, 5, 20)).unwrap());
        assert!(engine.is_room_available_for_dates(&fx.room_101, date(2031, 5, 14), date(2031, 5, 20)).unwrap());
        assert!(engine.is_room_available_for_dates(&fx.room_101, date(2031, 5, 1), date(2031, 5, 10)).unwrap());

        engine.cancel(booking.booking_id()).unwrap();
        assert!(engine.is_room_available_for_dates(&fx.room_101, date(2031, 5, 13), date(2031, 5, 20)).unwrap());
    }

    #[test]
    fn quote_breaks_down_cost() {
        let fx = Fixture::new();
        let room = fx.ctx.rooms.find_by_room_number(&fx.room_102).unwrap().unwrap();
        let q = fx.ctx.bookings.quote(&room, date(2031, 5, 10), date(2031, 5, 14)).unwrap();
        assert_eq!(q.nights, 4);
        assert_eq!(q.subtotal, dec!(320));
        assert_eq!(q.vat, dec!(32));
        assert_eq!(q.total, dec!(352));
        assert_eq!(
            fx.ctx.bookings.calculate_subtotal(&room, date(2031, 5, 10), date(2031, 5, 14)).unwrap(),
            dec!(320)
        );
        assert_eq!(
            fx.ctx.bookings.calculate_total_cost(&room, date(2031, 5, 10), date(2031, 5, 14)).unwrap(),
            dec!(352)
        );
        assert!(fx.ctx.bookings.quote(&room, date(2031, 5, 14), date(2031, 5, 10)).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: whatever sequence of requests arrives, confirmed stays per room never overlap.
        #[test]
        fn confirmed_stays_never_overlap(
            requests in prop::collection::vec((0usize..3, 0u64..40, 1u64..6, any::<bool>(), any::<bool>()), 1..40)
        ) {
            let fx = Fixture::new();
            let rooms = [fx.room_101.clone(), fx.room_102.clone(), fx.room_201.clone()];

            for (room_idx, offset, nights, reopen, cancel_one) in requests {
                let room = &rooms[room_idx];
                if reopen {
                    // Defeat the availability flag so only the overlap check guards.
                    fx.ctx.rooms.set_availability(room, true).unwrap();
                }
                let check_in = fx.today + Days::new(offset);
                let _ = fx.ctx.bookings.create(&fx.guest, room, check_in, check_in + Days::new(nights));

                if cancel_one {
                    if let Some(b) = fx.ctx.bookings.active_bookings().unwrap().first() {
                        fx.ctx.bookings.cancel(b.booking_id()).unwrap();
                    }
                }
            }

            let active = fx.ctx.bookings.active_bookings().unwrap();
            for (i, a) in active.iter().enumerate() {
                for b in &active[i + 1..] {
                    if a.room_number() == b.room_number() {
                        prop_assert!(!a.stay().overlaps(&b.stay()));
                    }
                }
            }
            for b in fx.ctx.bookings.all_bookings().unwrap() {
                if b.status() != BookingStatus::Cancelled {
                    prop_assert_eq!(b.refund_amount(), Decimal::ZERO);
                }
            }
        }
    }
}
