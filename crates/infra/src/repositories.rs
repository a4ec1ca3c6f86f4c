//! The four entity collections, opened together at start-up.

use std::path::Path;
use std::sync::Arc;

use innkeeper_bookings::Booking;
use innkeeper_core::{BookingId, GuestId, InvoiceId, RoomNumber};
use innkeeper_guests::Guest;
use innkeeper_invoicing::Invoice;
use innkeeper_rooms::Room;

use crate::record_store::{
    InMemoryRecordStore, JsonFileStore, RecordStore, SharedStore, StoreResult,
};

pub const ROOMS_FILE: &str = "rooms.json";
pub const GUESTS_FILE: &str = "guests.json";
pub const BOOKINGS_FILE: &str = "bookings.json";
pub const INVOICES_FILE: &str = "invoices.json";

/// Shared handles to every collection. Cloning shares the underlying stores.
#[derive(Clone)]
pub struct Repositories {
    pub rooms: SharedStore<RoomNumber, Room>,
    pub guests: SharedStore<GuestId, Guest>,
    pub bookings: SharedStore<BookingId, Booking>,
    pub invoices: SharedStore<InvoiceId, Invoice>,
}

impl Repositories {
    /// Open the JSON documents under `data_dir`. Missing documents start empty.
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = data_dir.as_ref();
        let repos = Self {
            rooms: Arc::new(JsonFileStore::<RoomNumber, Room>::for_entity(dir.join(ROOMS_FILE))?),
            guests: Arc::new(JsonFileStore::<GuestId, Guest>::for_entity(dir.join(GUESTS_FILE))?),
            bookings: Arc::new(JsonFileStore::<BookingId, Booking>::for_entity(dir.join(BOOKINGS_FILE))?),
            invoices: Arc::new(JsonFileStore::<InvoiceId, Invoice>::for_entity(dir.join(INVOICES_FILE))?),
        };
        let (rooms, guests) = (repos.rooms.count()?, repos.guests.count()?);
        let (bookings, invoices) = (repos.bookings.count()?, repos.invoices.count()?);
        tracing::info!(
            "opened data directory {} ({} rooms, {} guests, {} bookings, {} invoices)",
            dir.display(),
            rooms,
            guests,
            bookings,
            invoices
        );
        Ok(repos)
    }

    /// Unpersisted collections, for tests and dry runs.
    pub fn in_memory() -> Self {
        Self {
            rooms: Arc::new(InMemoryRecordStore::<RoomNumber, Room>::for_entity()),
            guests: Arc::new(InMemoryRecordStore::<GuestId, Guest>::for_entity()),
            bookings: Arc::new(InMemoryRecordStore::<BookingId, Booking>::for_entity()),
            invoices: Arc::new(InMemoryRecordStore::<InvoiceId, Invoice>::for_entity()),
        }
    }

    /// Reload every collection from its backing document.
    pub fn refresh_all(&self) -> StoreResult<()> {
        self.rooms.refresh()?;
        self.guests.refresh()?;
        self.bookings.refresh()?;
        self.invoices.refresh()
    }
}

impl core::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
