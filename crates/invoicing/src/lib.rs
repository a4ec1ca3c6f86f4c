//! Invoicing domain module.
//!
//! This crate contains business rules for booking invoices, implemented purely
//! as deterministic domain logic (no IO, no storage).

pub mod invoice;

pub use invoice::Invoice;
