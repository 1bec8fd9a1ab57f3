pub mod occupancy;
pub mod guests;

pub use occupancy::{OccupancyLimits, OccupancyTable, OccupancyType};
pub use guests::GuestCount;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown occupancy type: {0}")]
    UnknownOccupancy(String),
    #[error("Invalid occupancy limits for {tag}: {reason}")]
    InvalidLimits { tag: String, reason: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
