use tourdesk_catalog::RoomDefinition;
use tourdesk_core::{GuestCount, OccupancyType};

use crate::allocator::OccupancyAllocator;
use crate::changes::GuestChange;
use crate::models::{ReservationId, RoomReservation};
use crate::{AllocationError, AllocationResult};

/// Room reservations held by a booking form, in insertion order.
///
/// Entries are addressed by id, never by position, so removing one
/// reservation cannot shift another. There is no cap on guests across
/// rooms; each reservation is validated on its own.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    allocator: OccupancyAllocator,
    rooms: Vec<RoomDefinition>,
    reservations: Vec<RoomReservation>,
}

impl BookingDraft {
    /// Start an empty draft over the rooms available in this booking context
    pub fn new(allocator: OccupancyAllocator, rooms: Vec<RoomDefinition>) -> AllocationResult<Self> {
        for room in &rooms {
            room.validate_against(allocator.table())?;
        }

        Ok(Self {
            allocator,
            rooms,
            reservations: Vec::new(),
        })
    }

    pub fn rooms(&self) -> &[RoomDefinition] {
        &self.rooms
    }

    pub fn allocator(&self) -> &OccupancyAllocator {
        &self.allocator
    }

    /// Add a room, normalizing the requested guests for its occupancy
    pub fn add_room(
        &mut self,
        room_index: usize,
        occupancy: Option<OccupancyType>,
        guests: GuestCount,
    ) -> AllocationResult<ReservationId> {
        let reservation = self
            .allocator
            .create(ReservationId::new(), room_index, occupancy, guests, &self.rooms)?;
        let id = reservation.id;
        self.reservations.push(reservation);
        Ok(id)
    }

    /// Insert a caller-built reservation after validating it as-is
    pub fn insert(&mut self, reservation: RoomReservation) -> AllocationResult<()> {
        if self.get(&reservation.id).is_some() {
            return Err(AllocationError::DuplicateReservation(reservation.id));
        }
        self.allocator.validate(&reservation, &self.rooms)?;
        self.reservations.push(reservation);
        Ok(())
    }

    pub fn get(&self, id: &ReservationId) -> Option<&RoomReservation> {
        self.reservations.iter().find(|r| r.id == *id)
    }

    /// Replace a reservation with the result of `op`; on error nothing changes
    pub fn update<F>(&mut self, id: &ReservationId, op: F) -> AllocationResult<&RoomReservation>
    where
        F: FnOnce(&OccupancyAllocator, &RoomReservation, &[RoomDefinition]) -> AllocationResult<RoomReservation>,
    {
        let position = self
            .reservations
            .iter()
            .position(|r| r.id == *id)
            .ok_or(AllocationError::UnknownReservation(*id))?;

        let updated = op(&self.allocator, &self.reservations[position], self.rooms.as_slice())?;
        if updated.id != *id {
            return Err(AllocationError::InvariantViolated(format!(
                "update of {id} produced reservation {}",
                updated.id
            )));
        }

        self.reservations[position] = updated;
        Ok(&self.reservations[position])
    }

    pub fn change_guests(&mut self, id: &ReservationId, change: GuestChange) -> AllocationResult<&RoomReservation> {
        self.update(id, |allocator, reservation, rooms| {
            allocator.apply_guest_change(reservation, change, rooms)
        })
    }

    pub fn change_occupancy(
        &mut self,
        id: &ReservationId,
        occupancy: OccupancyType,
    ) -> AllocationResult<&RoomReservation> {
        self.update(id, |allocator, reservation, rooms| {
            allocator.change_occupancy(reservation, occupancy, rooms)
        })
    }

    pub fn reassign_room(&mut self, id: &ReservationId, room_index: usize) -> AllocationResult<&RoomReservation> {
        self.update(id, |allocator, reservation, rooms| {
            allocator.reassign_room(reservation, room_index, rooms)
        })
    }

    pub fn remove(&mut self, id: &ReservationId) -> AllocationResult<RoomReservation> {
        let position = self
            .reservations
            .iter()
            .position(|r| r.id == *id)
            .ok_or(AllocationError::UnknownReservation(*id))?;
        Ok(self.reservations.remove(position))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoomReservation> {
        self.reservations.iter()
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Guests summed across every room
    pub fn guest_totals(&self) -> GuestCount {
        self.reservations
            .iter()
            .fold(GuestCount::default(), |acc, r| acc + r.guests)
    }
}
