//! Shared fixtures for service tests.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use innkeeper_bookings::{Booking, RefundPolicy};
use innkeeper_core::{Clock, FixedClock, GuestId, RoomNumber};
use innkeeper_guests::Guest;
use innkeeper_infra::HotelSettings;
use innkeeper_rooms::{Room, RoomType};
use rust_decimal_macros::dec;

use crate::context::AppContext;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// In-memory hotel pinned to 2031-05-01:
/// room 101 (double, 100/night, refundable), 102 (single, 80/night, refundable),
/// 201 (suite, 250/night, non-refundable), and one guest. VAT 10%.
pub struct Fixture {
    pub ctx: AppContext,
    pub today: NaiveDate,
    pub now: NaiveDateTime,
    pub guest: GuestId,
    pub room_101: RoomNumber,
    pub room_102: RoomNumber,
    pub room_201: RoomNumber,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_policy(RefundPolicy::Tiered)
    }

    pub fn with_policy(policy: RefundPolicy) -> Self {
        let today = date(2031, 5, 1);
        let clock = FixedClock::on(today);
        let mut settings = HotelSettings::default();
        settings.set_default_refund_policy(policy);

        let ctx = AppContext::in_memory(settings, Arc::new(clock));

        let rooms = [
            ("101", RoomType::Double, dec!(100), true),
            ("102", RoomType::Single, dec!(80), true),
            ("201", RoomType::Suite, dec!(250), false),
        ];
        for (number, kind, price, refundable) in rooms {
            ctx.rooms
                .add_room(Room::new(number.parse().unwrap(), kind, price, refundable).unwrap())
                .unwrap();
        }

        let guest = ctx
            .guests
            .register_guest(
                Guest::new(
                    "G-ADA00001".parse().unwrap(),
                    "Ada Lovelace",
                    "555-0100",
                    "ada@example.com",
                )
                .unwrap(),
            )
            .unwrap();

        Self {
            ctx,
            today,
            now: clock.now(),
            guest: guest.id_typed().clone(),
            room_101: "101".parse().unwrap(),
            room_102: "102".parse().unwrap(),
            room_201: "201".parse().unwrap(),
        }
    }

    pub fn book(&self, room: &RoomNumber, check_in: NaiveDate, check_out: NaiveDate) -> Booking {
        self.ctx
            .bookings
            .create(&self.guest, room, check_in, check_out)
            .unwrap()
    }
}
