use std::sync::Arc;

use rust_decimal::Decimal;

use innkeeper_core::{BookingId, Clock, DomainError, InvoiceId};
use innkeeper_infra::{RecordStore, SharedStore};
use innkeeper_invoicing::Invoice;

use crate::error::ServiceResult;
use crate::services::bookings::BookingEngine;
use crate::services::rooms::RoomCatalog;

/// Issues at most one invoice per booking.
#[derive(Clone)]
pub struct InvoiceGenerator {
    invoices: SharedStore<InvoiceId, Invoice>,
    bookings: BookingEngine,
    rooms: RoomCatalog,
    clock: Arc<dyn Clock>,
}

impl InvoiceGenerator {
    pub fn new(
        invoices: SharedStore<InvoiceId, Invoice>,
        bookings: BookingEngine,
        rooms: RoomCatalog,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            invoices,
            bookings,
            rooms,
            clock,
        }
    }

    pub fn all_invoices(&self) -> ServiceResult<Vec<Invoice>> {
        Ok(self.invoices.find_all()?)
    }

    pub fn find_by_booking_id(&self, booking_id: &BookingId) -> ServiceResult<Option<Invoice>> {
        Ok(self
            .invoices
            .find_all()?
            .into_iter()
            .find(|inv| inv.booking_id() == booking_id))
    }

    /// Invoice for `booking_id`, issuing it on first call.
    ///
    /// Amounts are computed from the room's current nightly price and the
    /// configured VAT rate, not copied from the booking's stored total. The
    /// booking's current refund is carried over.
    pub fn generate(&self, booking_id: &BookingId) -> ServiceResult<Invoice> {
        if let Some(existing) = self.find_by_booking_id(booking_id)? {
            return Ok(existing);
        }

        let booking = self
            .bookings
            .find_by_id(booking_id)?
            .ok_or_else(|| DomainError::not_found(format!("booking {booking_id}")))?;
        let room = self
            .rooms
            .find_by_room_number(booking.room_number())?
            .ok_or_else(|| DomainError::not_found(format!("room {}", booking.room_number())))?;

        let cost = self.bookings.quote_stay(&room, &booking.stay())?;
        if cost.total != booking.total_cost() {
            tracing::warn!(
                "invoice total {} for booking {} differs from booked total {}",
                cost.total,
                booking_id,
                booking.total_cost()
            );
        }

        let invoice = Invoice::issue(
            InvoiceId::generate(),
            booking_id.clone(),
            self.clock.now(),
            &cost,
            booking.refund_amount(),
        )?;
        let invoice = self.invoices.save(invoice)?;

        tracing::info!(
            "invoice {} issued for booking {} (total {})",
            invoice.invoice_id(),
            booking_id,
            invoice.total()
        );
        Ok(invoice)
    }

    /// Overwrite the refund on an issued invoice. Totals stay as issued.
    pub fn amend_refund(&self, booking_id: &BookingId, refund_amount: Decimal) -> ServiceResult<Invoice> {
        let mut invoice = self
            .find_by_booking_id(booking_id)?
            .ok_or_else(|| DomainError::not_found(format!("invoice for booking {booking_id}")))?;
        invoice.amend_refund(refund_amount)?;
        let invoice = self.invoices.save(invoice)?;

        tracing::info!(
            "invoice {} refund amended to {}",
            invoice.invoice_id(),
            refund_amount
        );
        Ok(invoice)
    }
}
