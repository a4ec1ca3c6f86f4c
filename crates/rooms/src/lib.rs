//! Rooms domain module.
//!
//! This crate contains business rules for hotel rooms, implemented purely as
//! deterministic domain logic (no IO, no storage).

pub mod room;

pub use room::{Room, RoomType};
