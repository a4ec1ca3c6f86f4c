use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use innkeeper_bookings::CostBreakdown;
use innkeeper_core::{BookingId, DomainError, DomainResult, Entity, InvoiceId};

/// Cost breakdown document for one booking.
///
/// Subtotal, VAT rate, VAT and total are fixed when the invoice is issued; only
/// the refund figure can be amended afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    invoice_id: InvoiceId,
    booking_id: BookingId,
    #[serde(with = "timestamp")]
    generated_at: NaiveDateTime,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    vat_rate: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    vat: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    total: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision", default)]
    refund_amount: Decimal,
}

impl Invoice {
    /// Issue an invoice from a cost breakdown, carrying the booking's current refund.
    pub fn issue(
        invoice_id: InvoiceId,
        booking_id: BookingId,
        generated_at: NaiveDateTime,
        cost: &CostBreakdown,
        refund_amount: Decimal,
    ) -> DomainResult<Self> {
        ensure_refund(refund_amount)?;
        Ok(Self {
            invoice_id,
            booking_id,
            generated_at,
            subtotal: cost.subtotal,
            vat_rate: cost.vat_rate,
            vat: cost.vat,
            total: cost.total,
            refund_amount,
        })
    }

    pub fn invoice_id(&self) -> &InvoiceId {
        &self.invoice_id
    }

    pub fn booking_id(&self) -> &BookingId {
        &self.booking_id
    }

    pub fn generated_at(&self) -> NaiveDateTime {
        self.generated_at
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn vat_rate(&self) -> Decimal {
        self.vat_rate
    }

    pub fn vat(&self) -> Decimal {
        self.vat
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn refund_amount(&self) -> Decimal {
        self.refund_amount
    }

    /// Amount still payable: `total − refund`.
    pub fn final_amount(&self) -> Decimal {
        self.total - self.refund_amount
    }

    /// Overwrite the refund figure. Nothing else changes.
    pub fn amend_refund(&mut self, refund_amount: Decimal) -> DomainResult<()> {
        ensure_refund(refund_amount)?;
        self.refund_amount = refund_amount;
        Ok(())
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.invoice_id
    }
}

fn ensure_refund(amount: Decimal) -> DomainResult<()> {
    if amount < Decimal::ZERO {
        return Err(DomainError::validation("refund amount cannot be negative"));
    }
    Ok(())
}

/// `YYYY-MM-DDTHH:MM:SS` local timestamps.
mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    /// Accepts fractional seconds as well, as written by other ISO-8601 producers.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f").map_err(serde::de::Error::custom)
    }
}
