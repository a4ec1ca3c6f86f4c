//! Application services over the record stores.

pub mod bookings;
pub mod dashboard;
pub mod guests;
pub mod invoices;
pub mod rooms;

pub use bookings::BookingEngine;
pub use dashboard::{Dashboard, DashboardStats};
pub use guests::GuestDirectory;
pub use invoices::InvoiceGenerator;
pub use rooms::RoomCatalog;
