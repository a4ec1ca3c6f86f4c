//! Start-up wiring: one explicitly constructed context per process.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use innkeeper_core::Clock;
use innkeeper_infra::{HotelSettings, Repositories};

use crate::error::ServiceResult;
use crate::services::{BookingEngine, Dashboard, GuestDirectory, InvoiceGenerator, RoomCatalog};

/// Settings, collections and the services built over them.
#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<HotelSettings>,
    pub repositories: Repositories,
    pub rooms: RoomCatalog,
    pub guests: GuestDirectory,
    pub bookings: BookingEngine,
    pub invoices: InvoiceGenerator,
    pub dashboard: Dashboard,
    settings_path: Option<PathBuf>,
    clock: Arc<dyn Clock>,
}

impl AppContext {
    /// Load `settings.json` and open every collection under `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>, clock: Arc<dyn Clock>) -> ServiceResult<Self> {
        let dir = data_dir.as_ref();
        let settings_path = dir.join(HotelSettings::FILE_NAME);
        let settings = HotelSettings::load(&settings_path)?;
        let repositories = Repositories::open(dir)?;
        let mut ctx = Self::assemble(settings, repositories, clock);
        ctx.settings_path = Some(settings_path);
        Ok(ctx)
    }

    /// Context over unpersisted collections.
    pub fn in_memory(settings: HotelSettings, clock: Arc<dyn Clock>) -> Self {
        Self::assemble(settings, Repositories::in_memory(), clock)
    }

    pub fn assemble(
        settings: HotelSettings,
        repositories: Repositories,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let settings = Arc::new(settings);
        let rooms = RoomCatalog::new(repositories.rooms.clone(), repositories.bookings.clone());
        let guests = GuestDirectory::new(repositories.guests.clone());
        let bookings = BookingEngine::new(
            repositories.bookings.clone(),
            repositories.guests.clone(),
            rooms.clone(),
            settings.clone(),
            clock.clone(),
        );
        let invoices = InvoiceGenerator::new(
            repositories.invoices.clone(),
            bookings.clone(),
            rooms.clone(),
            clock.clone(),
        );
        let dashboard = Dashboard::new(rooms.clone(), guests.clone(), bookings.clone());

        Self {
            settings,
            repositories,
            rooms,
            guests,
            bookings,
            invoices,
            dashboard,
            settings_path: None,
            clock,
        }
    }

    /// Reload `settings.json` and every collection, picking up edits made
    /// outside this process.
    ///
    /// Services are rebuilt over the reloaded settings; clones taken before the
    /// call keep the previous ones. In-memory contexts only refresh collections.
    pub fn refresh_all(&mut self) -> ServiceResult<()> {
        if let Some(path) = self.settings_path.clone() {
            let settings = HotelSettings::load(&path)?;
            if settings != *self.settings {
                tracing::info!("settings reloaded from {}", path.display());
            }
            *self = Self::assemble(settings, self.repositories.clone(), self.clock.clone());
            self.settings_path = Some(path);
        }
        Ok(self.repositories.refresh_all()?)
    }
}

impl core::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppContext")
            .field("hotel", &self.settings.hotel_name())
            .finish_non_exhaustive()
    }
}
