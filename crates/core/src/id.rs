//! Strongly-typed identifiers used across the domain.
//!
//! All identifiers are plain strings on the wire. System-generated ones carry a
//! fixed per-entity prefix followed by an 8-character uppercase random token
//! (`BK-1A2B3C4D`); uniqueness is probabilistic.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Length of the random token appended to generated identifiers.
pub const TOKEN_LEN: usize = 8;

/// Identifier of a room (its room number, e.g. `"101"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomNumber(String);

/// Identifier of a guest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(String);

/// Identifier of a booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

/// Identifier of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

fn random_token() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(TOKEN_LEN);
    token.to_ascii_uppercase()
}

macro_rules! impl_string_id {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: cannot be blank", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

macro_rules! impl_generated_id {
    ($t:ty, $prefix:literal) => {
        impl $t {
            /// Fixed prefix of generated identifiers.
            pub const PREFIX: &'static str = $prefix;

            /// Generate a fresh identifier (`PREFIX` + random token).
            pub fn generate() -> Self {
                Self(format!("{}{}", $prefix, random_token()))
            }

            /// Whether this identifier has the shape of a generated one.
            ///
            /// Externally supplied identifiers are accepted even when this is false.
            pub fn is_generated_shape(&self) -> bool {
                self.0.strip_prefix($prefix).is_some_and(|token| {
                    token.len() == TOKEN_LEN
                        && token
                            .chars()
                            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
                })
            }
        }
    };
}

impl_string_id!(RoomNumber, "RoomNumber");
impl_string_id!(GuestId, "GuestId");
impl_string_id!(BookingId, "BookingId");
impl_string_id!(InvoiceId, "InvoiceId");

impl_generated_id!(GuestId, "G-");
impl_generated_id!(BookingId, "BK-");
impl_generated_id!(InvoiceId, "INV-");
