use chrono::NaiveDate;

use innkeeper_bookings::{Booking, StayPeriod};
use innkeeper_core::{BookingId, DomainError, RoomNumber};
use innkeeper_infra::{RecordStore, SharedStore};
use innkeeper_rooms::{Room, RoomType};

use crate::error::ServiceResult;

/// Room inventory management.
#[derive(Clone)]
pub struct RoomCatalog {
    rooms: SharedStore<RoomNumber, Room>,
    bookings: SharedStore<BookingId, Booking>,
}

impl RoomCatalog {
    pub fn new(
        rooms: SharedStore<RoomNumber, Room>,
        bookings: SharedStore<BookingId, Booking>,
    ) -> Self {
        Self { rooms, bookings }
    }

    pub fn all_rooms(&self) -> ServiceResult<Vec<Room>> {
        Ok(self.rooms.find_all()?)
    }

    pub fn find_by_room_number(&self, number: &RoomNumber) -> ServiceResult<Option<Room>> {
        Ok(self.rooms.find_by_id(number)?)
    }

    pub fn add_room(&self, room: Room) -> ServiceResult<Room> {
        if self.rooms.exists_by_id(room.room_number())? {
            return Err(DomainError::conflict(format!(
                "room {} already exists",
                room.room_number()
            ))
            .into());
        }
        let room = self.rooms.save(room)?;
        tracing::info!("added room {} ({})", room.room_number(), room.room_type());
        Ok(room)
    }

    pub fn update_room(&self, room: Room) -> ServiceResult<Room> {
        if !self.rooms.exists_by_id(room.room_number())? {
            return Err(DomainError::not_found(format!("room {}", room.room_number())).into());
        }
        Ok(self.rooms.save(room)?)
    }

    /// Remove a room nothing refers to. Returns whether a room was removed.
    pub fn delete_room(&self, number: &RoomNumber) -> ServiceResult<bool> {
        let referenced = self
            .bookings
            .find_all()?
            .iter()
            .any(|b| b.room_number() == number);
        if referenced {
            return Err(DomainError::conflict(format!(
                "room {number} is referenced by existing bookings"
            ))
            .into());
        }

        let removed = self.rooms.delete(number)?;
        if removed {
            tracing::info!("deleted room {}", number);
        }
        Ok(removed)
    }

    pub fn available_rooms(&self) -> ServiceResult<Vec<Room>> {
        Ok(self.rooms.find_matching(&|r: &Room| r.is_available())?)
    }

    pub fn available_rooms_by_type(&self, room_type: RoomType) -> ServiceResult<Vec<Room>> {
        Ok(self
            .rooms
            .find_matching(&|r: &Room| r.is_available() && r.room_type() == room_type)?)
    }

    /// Case-insensitive substring search on the room number.
    pub fn search_by_room_number(&self, term: &str) -> ServiceResult<Vec<Room>> {
        let term = term.to_lowercase();
        Ok(self
            .rooms
            .find_matching(&|r: &Room| r.room_number().as_str().to_lowercase().contains(&term))?)
    }

    pub fn set_availability(&self, number: &RoomNumber, available: bool) -> ServiceResult<Room> {
        let mut room = self
            .rooms
            .find_by_id(number)?
            .ok_or_else(|| DomainError::not_found(format!("room {number}")))?;
        room.set_available(available);
        Ok(self.rooms.save(room)?)
    }

    pub fn total_room_count(&self) -> ServiceResult<usize> {
        Ok(self.rooms.count()?)
    }

    pub fn available_room_count(&self) -> ServiceResult<usize> {
        Ok(self.available_rooms()?.len())
    }

    /// Rooms flagged available with no confirmed booking overlapping the stay.
    pub fn available_rooms_for_dates(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> ServiceResult<Vec<Room>> {
        let stay = StayPeriod::new(check_in, check_out)?;
        let bookings = self.bookings.find_all()?;
        Ok(self
            .available_rooms()?
            .into_iter()
            .filter(|room| !bookings.iter().any(|b| b.blocks(room.room_number(), &stay)))
            .collect())
    }

    /// Whether no confirmed booking holds `number` during `stay`.
    pub fn is_free_for_stay(&self, number: &RoomNumber, stay: &StayPeriod) -> ServiceResult<bool> {
        let bookings = self.bookings.find_all()?;
        Ok(!bookings.iter().any(|b| b.blocks(number, stay)))
    }
}
