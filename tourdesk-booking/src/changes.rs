use serde::{Deserialize, Serialize};
use std::fmt;
use tourdesk_catalog::RoomDefinition;
use tracing::debug;

use crate::allocator::OccupancyAllocator;
use crate::models::RoomReservation;
use crate::{AllocationError, AllocationResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GuestKind {
    Adult,
    Child,
    Infant,
}

impl fmt::Display for GuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GuestKind::Adult => "adults",
            GuestKind::Child => "children",
            GuestKind::Infant => "infants",
        })
    }
}

/// Single-unit guest mutation triggered by a +/- control
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", content = "guest", rename_all = "lowercase")]
pub enum GuestChange {
    Add(GuestKind),
    Remove(GuestKind),
}

impl OccupancyAllocator {
    /// Apply one guest change, all or nothing.
    ///
    /// A refused change returns an error and the input reservation stays
    /// the current valid state.
    pub fn apply_guest_change(
        &self,
        reservation: &RoomReservation,
        change: GuestChange,
        rooms: &[RoomDefinition],
    ) -> AllocationResult<RoomReservation> {
        self.validate(reservation, rooms)?;

        let result = self.next_guests(reservation, change).and_then(|guests| {
            let candidate = reservation.with_guests(guests);
            self.validate(&candidate, rooms)?;
            Ok(candidate)
        });

        if let Err(err) = &result {
            debug!(reservation = %reservation.id, ?change, error = %err, "guest change rejected");
        }
        result
    }

    fn next_guests(
        &self,
        reservation: &RoomReservation,
        change: GuestChange,
    ) -> AllocationResult<tourdesk_core::GuestCount> {
        let occupancy = reservation.occupancy;
        let limits = self.limits(occupancy)?;
        let mut guests = reservation.guests;

        match change {
            GuestChange::Add(GuestKind::Adult | GuestKind::Child) => {
                if guests.occupants() >= limits.max_occupancy {
                    return Err(AllocationError::CapacityReached {
                        occupancy,
                        max: limits.max_occupancy,
                    });
                }
                match change {
                    GuestChange::Add(GuestKind::Adult) => guests.adults += 1,
                    _ => guests.children += 1,
                }
            }
            GuestChange::Remove(kind @ (GuestKind::Adult | GuestKind::Child)) => {
                let count = match kind {
                    GuestKind::Adult => &mut guests.adults,
                    _ => &mut guests.children,
                };
                if *count == 0 {
                    return Err(AllocationError::NoGuestsToRemove(kind));
                }
                *count -= 1;
                if guests.occupants() < limits.min_occupancy.max(1) {
                    return Err(AllocationError::BelowMinimum {
                        occupancy,
                        min: limits.min_occupancy,
                    });
                }
            }
            GuestChange::Add(GuestKind::Infant) => {
                if guests.infants >= limits.max_infants {
                    return Err(AllocationError::InfantLimitReached {
                        occupancy,
                        max: limits.max_infants,
                    });
                }
                guests.infants += 1;
            }
            GuestChange::Remove(GuestKind::Infant) => {
                if guests.infants == 0 {
                    return Err(AllocationError::NoGuestsToRemove(GuestKind::Infant));
                }
                guests.infants -= 1;
            }
        }

        Ok(guests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservationId;
    use std::collections::BTreeMap;
    use tourdesk_catalog::CapacityPrice;
    use tourdesk_core::{GuestCount, OccupancyLimits, OccupancyTable, OccupancyType};

    fn doubles_only() -> Vec<RoomDefinition> {
        vec![RoomDefinition::new(
            "Twin",
            vec![OccupancyType::Double],
            BTreeMap::from([(OccupancyType::Double, CapacityPrice::adult_only(9_000))]),
        )
        .unwrap()]
    }

    fn roomy_allocator() -> OccupancyAllocator {
        // Double that tolerates one extra child
        OccupancyAllocator::new(
            OccupancyTable::new([(OccupancyType::Double, OccupancyLimits::new(1, 3, 1))]).unwrap(),
        )
    }

    #[test]
    fn test_double_room_scenario() {
        let allocator = OccupancyAllocator::default();
        let rooms = doubles_only();
        let start = allocator
            .create(ReservationId::new(), 0, None, GuestCount::new(2, 0, 0), &rooms)
            .unwrap();

        let err = allocator
            .apply_guest_change(&start, GuestChange::Add(GuestKind::Child), &rooms)
            .unwrap_err();
        assert_eq!(
            err,
            AllocationError::CapacityReached {
                occupancy: OccupancyType::Double,
                max: 2
            }
        );
        assert!(err.is_rejection());
        assert_eq!(start.guests, GuestCount::new(2, 0, 0));

        let one = allocator
            .apply_guest_change(&start, GuestChange::Add(GuestKind::Infant), &rooms)
            .unwrap();
        let two = allocator
            .apply_guest_change(&one, GuestChange::Add(GuestKind::Infant), &rooms)
            .unwrap();
        assert_eq!(two.infants(), 2);

        let result = allocator.apply_guest_change(&two, GuestChange::Add(GuestKind::Infant), &rooms);
        assert!(matches!(result, Err(AllocationError::InfantLimitReached { max: 2, .. })));
    }

    #[test]
    fn test_remove_below_minimum_rejected() {
        let allocator = OccupancyAllocator::default();
        let rooms = doubles_only();
        let start = allocator
            .create(ReservationId::new(), 0, None, GuestCount::new(2, 0, 0), &rooms)
            .unwrap();

        let result = allocator.apply_guest_change(&start, GuestChange::Remove(GuestKind::Adult), &rooms);
        assert_eq!(
            result,
            Err(AllocationError::BelowMinimum {
                occupancy: OccupancyType::Double,
                min: 2
            })
        );

        let result = allocator.apply_guest_change(&start, GuestChange::Remove(GuestKind::Child), &rooms);
        assert_eq!(result, Err(AllocationError::NoGuestsToRemove(GuestKind::Child)));
    }

    #[test]
    fn test_remove_child_below_minimum_rejected() {
        let allocator = OccupancyAllocator::new(
            OccupancyTable::new([(OccupancyType::Double, OccupancyLimits::new(2, 3, 1))]).unwrap(),
        );
        let rooms = doubles_only();
        let start = allocator
            .create(ReservationId::new(), 0, None, GuestCount::new(1, 1, 0), &rooms)
            .unwrap();
        assert_eq!(start.guests, GuestCount::new(1, 1, 0));

        let result = allocator.apply_guest_change(&start, GuestChange::Remove(GuestKind::Child), &rooms);
        assert_eq!(
            result,
            Err(AllocationError::BelowMinimum {
                occupancy: OccupancyType::Double,
                min: 2
            })
        );
        assert!(result.unwrap_err().is_rejection());
    }

    #[test]
    fn test_infants_floor_at_zero() {
        let allocator = OccupancyAllocator::default();
        let rooms = doubles_only();
        let start = allocator
            .create(ReservationId::new(), 0, None, GuestCount::new(2, 0, 0), &rooms)
            .unwrap();

        let result = allocator.apply_guest_change(&start, GuestChange::Remove(GuestKind::Infant), &rooms);
        assert_eq!(result, Err(AllocationError::NoGuestsToRemove(GuestKind::Infant)));
    }

    #[test]
    fn test_add_and_remove_within_limits() {
        let allocator = roomy_allocator();
        let rooms = doubles_only();
        let start = allocator
            .create(ReservationId::new(), 0, None, GuestCount::new(2, 0, 0), &rooms)
            .unwrap();

        let with_child = allocator
            .apply_guest_change(&start, GuestChange::Add(GuestKind::Child), &rooms)
            .unwrap();
        assert_eq!(with_child.guests, GuestCount::new(2, 1, 0));

        let result = allocator.apply_guest_change(&with_child, GuestChange::Add(GuestKind::Adult), &rooms);
        assert!(matches!(result, Err(AllocationError::CapacityReached { max: 3, .. })));

        let fewer = allocator
            .apply_guest_change(&with_child, GuestChange::Remove(GuestKind::Adult), &rooms)
            .unwrap();
        assert_eq!(fewer.guests, GuestCount::new(1, 1, 0));
    }

    #[test]
    fn test_change_on_dangling_reservation_is_reference_error() {
        let allocator = OccupancyAllocator::default();
        let rooms = doubles_only();
        let dangling = RoomReservation {
            id: ReservationId::new(),
            room_index: 4,
            occupancy: OccupancyType::Double,
            guests: GuestCount::new(2, 0, 0),
        };

        let err = allocator
            .apply_guest_change(&dangling, GuestChange::Add(GuestKind::Infant), &rooms)
            .unwrap_err();
        assert!(matches!(err, AllocationError::UnknownRoom { index: 4, .. }));
        assert!(!err.is_rejection());
    }

    #[test]
    fn test_full_room_never_grows() {
        let allocator = OccupancyAllocator::default();
        let rooms = doubles_only();
        let full = allocator
            .create(ReservationId::new(), 0, None, GuestCount::new(1, 1, 0), &rooms)
            .unwrap();

        for kind in [GuestKind::Adult, GuestKind::Child] {
            let result = allocator.apply_guest_change(&full, GuestChange::Add(kind), &rooms);
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_change_wire_format() {
        let change: GuestChange = serde_json::from_str(r#"{"action": "add", "guest": "infant"}"#).unwrap();
        assert_eq!(change, GuestChange::Add(GuestKind::Infant));
    }
}
