//! Hotel application services: room catalog, guest directory, booking engine,
//! invoice generator and dashboard, wired over the record stores.

pub mod context;
pub mod error;
pub mod services;

pub use context::AppContext;
pub use error::{ServiceError, ServiceResult};
pub use services::{
    BookingEngine, Dashboard, DashboardStats, GuestDirectory, InvoiceGenerator, RoomCatalog,
};

#[cfg(test)]
mod testing;
