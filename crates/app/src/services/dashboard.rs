use serde::Serialize;

use crate::error::ServiceResult;
use crate::services::bookings::BookingEngine;
use crate::services::guests::GuestDirectory;
use crate::services::rooms::RoomCatalog;

/// Headline occupancy figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_rooms: usize,
    pub available_rooms: usize,
    pub active_bookings: usize,
    pub total_guests: usize,
}

#[derive(Clone)]
pub struct Dashboard {
    rooms: RoomCatalog,
    guests: GuestDirectory,
    bookings: BookingEngine,
}

impl Dashboard {
    pub fn new(rooms: RoomCatalog, guests: GuestDirectory, bookings: BookingEngine) -> Self {
        Self {
            rooms,
            guests,
            bookings,
        }
    }

    pub fn snapshot(&self) -> ServiceResult<DashboardStats> {
        Ok(DashboardStats {
            total_rooms: self.rooms.total_room_count()?,
            available_rooms: self.rooms.available_room_count()?,
            active_bookings: self.bookings.active_booking_count()?,
            total_guests: self.guests.guest_count()?,
        })
    }
}
