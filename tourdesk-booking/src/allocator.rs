use tourdesk_catalog::RoomDefinition;
use tourdesk_core::{GuestCount, OccupancyLimits, OccupancyTable, OccupancyType};
use tracing::debug;

use crate::models::{ReservationId, RoomReservation};
use crate::{AllocationError, AllocationResult};

/// Distributes guests across room reservations within occupancy limits.
///
/// Every operation is pure: it takes the current reservation and returns a
/// new, validated one. A rejected operation returns an error and the
/// caller keeps its previous value.
#[derive(Debug, Clone, Default)]
pub struct OccupancyAllocator {
    table: OccupancyTable,
}

impl OccupancyAllocator {
    pub fn new(table: OccupancyTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &OccupancyTable {
        &self.table
    }

    pub fn limits(&self, occupancy: OccupancyType) -> AllocationResult<&OccupancyLimits> {
        Ok(self.table.limits(occupancy)?)
    }

    /// Bring any guest split into a valid configuration for `occupancy`.
    ///
    /// Idempotent on splits that are already valid.
    pub fn normalize_guests_for_occupancy(
        &self,
        occupancy: OccupancyType,
        guests: GuestCount,
    ) -> AllocationResult<GuestCount> {
        let limits = self.limits(occupancy)?;
        let infants = guests.infants.min(limits.max_infants);

        // Switching to single is a hard reset to one adult
        if occupancy == OccupancyType::Single && guests.occupants() > 1 {
            return Ok(GuestCount::new(1, 0, infants));
        }

        let (mut adults, mut children) = (guests.adults, guests.children);

        if adults.saturating_add(children) < limits.min_occupancy {
            adults = limits.min_occupancy;
            children = 0;
        }

        let excess = adults.saturating_add(children).saturating_sub(limits.max_occupancy);
        if excess > 0 {
            let from_children = excess.min(children);
            children -= from_children;
            let from_adults = (excess - from_children).min(adults.saturating_sub(limits.min_occupancy));
            adults -= from_adults;
        }

        if adults.saturating_add(children) < 1 {
            adults = 1;
            children = 0;
        }

        Ok(GuestCount::new(adults, children, infants))
    }

    /// Create a reservation for `room_index`, normalizing the requested split.
    ///
    /// Without an explicit occupancy the room's first supported type is used.
    pub fn create(
        &self,
        id: ReservationId,
        room_index: usize,
        occupancy: Option<OccupancyType>,
        guests: GuestCount,
        rooms: &[RoomDefinition],
    ) -> AllocationResult<RoomReservation> {
        let room = room_at(rooms, room_index)?;
        let occupancy = match occupancy {
            Some(tag) => ensure_supported(room, tag)?,
            None => room.default_occupancy()?,
        };

        let guests = self.normalize_guests_for_occupancy(occupancy, guests)?;
        let reservation = RoomReservation {
            id,
            room_index,
            occupancy,
            guests,
        };

        self.validate(&reservation, rooms)?;
        Ok(reservation)
    }

    /// Check referential integrity and every capacity invariant
    pub fn validate(&self, reservation: &RoomReservation, rooms: &[RoomDefinition]) -> AllocationResult<()> {
        let room = room_at(rooms, reservation.room_index)?;
        ensure_supported(room, reservation.occupancy)?;
        let limits = self.limits(reservation.occupancy)?;
        let occupants = reservation.guests.occupants();

        if occupants > limits.max_occupancy {
            return Err(AllocationError::InvariantViolated(format!(
                "{occupants} guests exceed {} capacity of {}",
                reservation.occupancy, limits.max_occupancy
            )));
        }
        if occupants < limits.min_occupancy || occupants < 1 {
            return Err(AllocationError::InvariantViolated(format!(
                "{occupants} guests below {} minimum of {}",
                reservation.occupancy, limits.min_occupancy
            )));
        }
        if reservation.guests.infants > limits.max_infants {
            return Err(AllocationError::InvariantViolated(format!(
                "{} infants exceed {} limit of {}",
                reservation.guests.infants, reservation.occupancy, limits.max_infants
            )));
        }

        Ok(())
    }

    /// Move a reservation to another room, keeping its occupancy when the
    /// new room supports it and falling back to the room's default otherwise
    pub fn reassign_room(
        &self,
        reservation: &RoomReservation,
        room_index: usize,
        rooms: &[RoomDefinition],
    ) -> AllocationResult<RoomReservation> {
        self.reassign(reservation, room_index, None, reservation.guests, rooms)
    }

    /// Switch occupancy within the current room
    pub fn change_occupancy(
        &self,
        reservation: &RoomReservation,
        occupancy: OccupancyType,
        rooms: &[RoomDefinition],
    ) -> AllocationResult<RoomReservation> {
        self.reassign(reservation, reservation.room_index, Some(occupancy), reservation.guests, rooms)
    }

    /// Reassign room, occupancy and guests in one step, then normalize.
    ///
    /// This is the only path that may carry a split below the occupancy
    /// minimum, since normalization resolves it before anything persists.
    pub fn reassign(
        &self,
        reservation: &RoomReservation,
        room_index: usize,
        occupancy: Option<OccupancyType>,
        guests: GuestCount,
        rooms: &[RoomDefinition],
    ) -> AllocationResult<RoomReservation> {
        let room = room_at(rooms, room_index)?;
        let occupancy = match occupancy {
            Some(tag) => ensure_supported(room, tag)?,
            None if room.supports(reservation.occupancy) => reservation.occupancy,
            None => room.default_occupancy()?,
        };

        let normalized = self.normalize_guests_for_occupancy(occupancy, guests)?;
        let updated = RoomReservation {
            id: reservation.id,
            room_index,
            occupancy,
            guests: normalized,
        };
        self.validate(&updated, rooms)?;

        debug!(
            reservation = %reservation.id,
            room_index,
            %occupancy,
            adults = normalized.adults,
            children = normalized.children,
            infants = normalized.infants,
            "reservation reassigned"
        );

        Ok(updated)
    }
}

fn room_at(rooms: &[RoomDefinition], index: usize) -> AllocationResult<&RoomDefinition> {
    rooms.get(index).ok_or(AllocationError::UnknownRoom {
        index,
        available: rooms.len(),
    })
}

fn ensure_supported(room: &RoomDefinition, occupancy: OccupancyType) -> AllocationResult<OccupancyType> {
    if room.supports(occupancy) {
        Ok(occupancy)
    } else {
        Err(AllocationError::UnsupportedOccupancy {
            room: room.name.clone(),
            occupancy,
        })
    }
}
