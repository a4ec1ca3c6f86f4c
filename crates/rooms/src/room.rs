use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use innkeeper_core::{DomainError, DomainResult, Entity, RoomNumber};

/// Room category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoomType {
    Single,
    Double,
    Suite,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::Single, RoomType::Double, RoomType::Suite];

    pub fn display_name(self) -> &'static str {
        match self {
            RoomType::Single => "Single Room",
            RoomType::Double => "Double Room",
            RoomType::Suite => "Suite",
        }
    }

    pub fn max_occupancy(self) -> u32 {
        match self {
            RoomType::Single => 1,
            RoomType::Double => 2,
            RoomType::Suite => 4,
        }
    }
}

impl core::fmt::Display for RoomType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for RoomType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SINGLE" => Ok(RoomType::Single),
            "DOUBLE" => Ok(RoomType::Double),
            "SUITE" => Ok(RoomType::Suite),
            other => Err(DomainError::validation(format!(
                "unknown room type '{other}' (expected SINGLE, DOUBLE or SUITE)"
            ))),
        }
    }
}

/// A bookable room, keyed by its room number.
///
/// `available` is flipped by the booking engine when a stay is created,
/// cancelled or completed; everything else is edited by room management.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    room_number: RoomNumber,
    #[serde(rename = "type")]
    room_type: RoomType,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    price_per_night: Decimal,
    available: bool,
    refundable: bool,
}

impl Room {
    /// Create a room. New rooms start out available.
    pub fn new(
        room_number: RoomNumber,
        room_type: RoomType,
        price_per_night: Decimal,
        refundable: bool,
    ) -> DomainResult<Self> {
        ensure_price(price_per_night)?;
        Ok(Self {
            room_number,
            room_type,
            price_per_night,
            available: true,
            refundable,
        })
    }

    pub fn room_number(&self) -> &RoomNumber {
        &self.room_number
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn price_per_night(&self) -> Decimal {
        self.price_per_night
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn is_refundable(&self) -> bool {
        self.refundable
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn set_refundable(&mut self, refundable: bool) {
        self.refundable = refundable;
    }

    pub fn set_room_type(&mut self, room_type: RoomType) {
        self.room_type = room_type;
    }

    /// Invariant: price per night is never negative.
    pub fn set_price_per_night(&mut self, price: Decimal) -> DomainResult<()> {
        ensure_price(price)?;
        self.price_per_night = price;
        Ok(())
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }
}

impl Entity for Room {
    type Id = RoomNumber;

    fn id(&self) -> &Self::Id {
        &self.room_number
    }
}

fn ensure_price(price: Decimal) -> DomainResult<()> {
    if price < Decimal::ZERO {
        return Err(DomainError::validation("price per night cannot be negative"));
    }
    Ok(())
}
