use serde::{Deserialize, Serialize};
use std::fmt;
use tourdesk_core::{GuestCount, OccupancyType};
use uuid::Uuid;

/// Opaque, caller-assigned reservation key; unique within a draft
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ReservationId(pub Uuid);

impl ReservationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ReservationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One hotel room held by a booking draft
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomReservation {
    pub id: ReservationId,
    /// Index into the room definitions of the booking context
    pub room_index: usize,
    pub occupancy: OccupancyType,
    #[serde(flatten)]
    pub guests: GuestCount,
}

impl RoomReservation {
    pub fn adults(&self) -> u32 {
        self.guests.adults
    }

    pub fn children(&self) -> u32 {
        self.guests.children
    }

    pub fn infants(&self) -> u32 {
        self.guests.infants
    }

    /// Copy with a new guest split, everything else kept
    pub fn with_guests(&self, guests: GuestCount) -> Self {
        Self {
            guests,
            ..self.clone()
        }
    }
}
