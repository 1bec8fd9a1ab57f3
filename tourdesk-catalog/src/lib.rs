pub mod room;
pub mod pricing;
pub mod markup;
pub mod stay;

pub use room::{CapacityPrice, RoomDefinition};
pub use pricing::{
    PriceTiers, PricingConfig, PricingEngine, PricingLineItem, ResourceType, TravelerBreakdown,
};
pub use markup::{apply_markup, MarkupPolicy};
pub use stay::{nights_between, StayDates};

use tourdesk_core::{CoreError, OccupancyType};

/// Catalog-level errors: malformed inventory data or pricing inputs
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Room {0} supports no occupancy types")]
    EmptySupportedOccupancies(String),

    #[error("Room {room} lists occupancy {occupancy} more than once")]
    DuplicateOccupancy {
        room: String,
        occupancy: OccupancyType,
    },

    #[error("Room {room} has no capacity price for {occupancy}")]
    MissingCapacityPrice {
        room: String,
        occupancy: OccupancyType,
    },

    #[error("Invalid markup: {0}")]
    InvalidMarkup(String),

    #[error("Negative amount: {0}")]
    NegativeAmount(String),

    #[error("Amount out of range: {0}")]
    AmountOverflow(String),

    #[error("Invalid fallback ratio: {0}")]
    InvalidRatio(String),

    #[error("Invalid stay: check-out {check_out} is before check-in {check_in}")]
    InvalidStay {
        check_in: chrono::NaiveDate,
        check_out: chrono::NaiveDate,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
