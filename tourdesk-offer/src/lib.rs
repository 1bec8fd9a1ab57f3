pub mod models;
pub mod aggregator;

pub use models::{BookingSubmission, PackagePrice, PackageQuote, SubmittedRoom};
pub use aggregator::PackageAggregator;

use tourdesk_booking::AllocationError;
use tourdesk_catalog::CatalogError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OfferError {
    #[error("Pricing input rejected: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Room allocation failed: {0}")]
    Allocation(#[from] AllocationError),

    #[error("Draft has no rooms to quote")]
    EmptyDraft,
}

pub type OfferResult<T> = Result<T, OfferError>;
