//! Stay pricing: nights × nightly price, plus VAT.

use rust_decimal::Decimal;

use innkeeper_core::{DomainError, DomainResult};

use crate::stay::StayPeriod;

/// Subtotal / VAT / total for a stay.
///
/// Amounts are exact decimals; no rounding is applied here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostBreakdown {
    pub nights: u32,
    pub subtotal: Decimal,
    pub vat_rate: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
}

impl CostBreakdown {
    /// `subtotal = nights × price`, `vat = subtotal × rate`, `total = subtotal + vat`.
    ///
    /// Fails with a validation error when any amount exceeds the decimal range.
    pub fn compute(
        stay: &StayPeriod,
        price_per_night: Decimal,
        vat_rate: Decimal,
    ) -> DomainResult<Self> {
        let nights = stay.nights();
        let out_of_range = || {
            DomainError::validation(format!(
                "cost of {nights} nights at {price_per_night} is out of range"
            ))
        };
        let subtotal = Decimal::from(nights)
            .checked_mul(price_per_night)
            .ok_or_else(out_of_range)?;
        let vat = subtotal.checked_mul(vat_rate).ok_or_else(out_of_range)?;
        let total = subtotal.checked_add(vat).ok_or_else(out_of_range)?;
        Ok(Self {
            nights,
            subtotal,
            vat_rate,
            vat,
            total,
        })
    }
}
