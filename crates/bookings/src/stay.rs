//! Stay intervals.

use chrono::NaiveDate;

use innkeeper_core::{DomainError, DomainResult};

/// Half-open date interval `[check_in, check_out)`.
///
/// The check-out day itself is free for the next guest, so back-to-back stays
/// never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StayPeriod {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayPeriod {
    /// Invariant: check-out is strictly after check-in.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> DomainResult<Self> {
        if check_out <= check_in {
            return Err(DomainError::validation(
                "check-out must be after check-in",
            ));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Rebuild from already-persisted dates without re-validating them.
    pub(crate) fn from_stored(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Whole nights between check-in and check-out.
    pub fn nights(&self) -> u32 {
        let days = (self.check_out - self.check_in).num_days().max(0);
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// `self.start < other.end && other.start < self.end`.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}
