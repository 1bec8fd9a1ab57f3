pub mod models;
pub mod allocator;
pub mod changes;
pub mod draft;

pub use models::{ReservationId, RoomReservation};
pub use allocator::OccupancyAllocator;
pub use changes::{GuestChange, GuestKind};
pub use draft::BookingDraft;

use tourdesk_catalog::CatalogError;
use tourdesk_core::{CoreError, OccupancyType};

/// Allocation failures.
///
/// Invalid references point at a bug in the calling code; rejections are
/// business rules refusing a mutation and leave the prior state intact.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AllocationError {
    #[error("Unknown room index {index} ({available} rooms available)")]
    UnknownRoom { index: usize, available: usize },

    #[error("Room {room} does not support occupancy {occupancy}")]
    UnsupportedOccupancy {
        room: String,
        occupancy: OccupancyType,
    },

    #[error("Reservation not found: {0}")]
    UnknownReservation(ReservationId),

    #[error("Reservation already exists: {0}")]
    DuplicateReservation(ReservationId),

    #[error("Occupancy {occupancy} is full ({max} guests)")]
    CapacityReached { occupancy: OccupancyType, max: u32 },

    #[error("Occupancy {occupancy} needs at least {min} guests")]
    BelowMinimum { occupancy: OccupancyType, min: u32 },

    #[error("Occupancy {occupancy} allows at most {max} infants")]
    InfantLimitReached { occupancy: OccupancyType, max: u32 },

    #[error("No {0} left to remove")]
    NoGuestsToRemove(GuestKind),

    #[error("Reservation invariant violated: {0}")]
    InvariantViolated(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl AllocationError {
    /// True when a business rule refused the mutation, false for bad references
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AllocationError::CapacityReached { .. }
                | AllocationError::BelowMinimum { .. }
                | AllocationError::InfantLimitReached { .. }
                | AllocationError::NoGuestsToRemove(_)
                | AllocationError::InvariantViolated(_)
        )
    }
}

pub type AllocationResult<T> = Result<T, AllocationError>;
