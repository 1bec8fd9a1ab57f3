use anyhow::Context;
use serde::{Deserialize, Serialize};
use tourdesk_booking::{BookingDraft, OccupancyAllocator};
use tourdesk_catalog::{MarkupPolicy, PricingEngine, PricingLineItem, RoomDefinition, StayDates};
use tourdesk_core::{GuestCount, OccupancyTable, OccupancyType};
use tourdesk_offer::{BookingSubmission, PackageAggregator, PackageQuote};
use tracing::info;

use crate::app_config::Config;

/// Quote input as the booking form would send it
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    pub rooms: Vec<RoomDefinition>,
    pub reservations: Vec<RequestedRoom>,
    /// When present, each reservation is charged its room's nightly rate
    #[serde(default)]
    pub stay: Option<StayDates>,
    /// Items shared by every guest (flights, transfers, activities)
    #[serde(default)]
    pub line_items: Vec<PricingLineItem>,
    #[serde(default)]
    pub markup: Option<MarkupPolicy>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestedRoom {
    pub room_index: usize,
    #[serde(default)]
    pub occupancy: Option<OccupancyType>,
    #[serde(flatten)]
    pub guests: GuestCount,
}

/// A requested split that had to be normalized to fit its occupancy
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Adjustment {
    pub position: usize,
    pub occupancy: OccupancyType,
    pub requested: GuestCount,
    pub applied: GuestCount,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub quote: PackageQuote,
    pub submission: BookingSubmission,
    pub adjustments: Vec<Adjustment>,
}

pub fn run_quote(request: &QuoteRequest, config: &Config) -> anyhow::Result<QuoteResponse> {
    let engine = PricingEngine::new(config.pricing.fallback_ratios()).context("Invalid pricing configuration")?;
    let aggregator = PackageAggregator::new(engine);

    let allocator = OccupancyAllocator::new(OccupancyTable::standard());
    let mut draft = BookingDraft::new(allocator, request.rooms.clone()).context("Invalid room definitions")?;

    let mut adjustments = Vec::new();
    for (position, requested) in request.reservations.iter().enumerate() {
        let id = draft
            .add_room(requested.room_index, requested.occupancy, requested.guests)
            .with_context(|| format!("Reservation #{position} could not be allocated"))?;
        let Some(reservation) = draft.get(&id) else {
            anyhow::bail!("Reservation #{position} missing after allocation");
        };

        if reservation.guests != requested.guests {
            info!(
                position,
                occupancy = %reservation.occupancy,
                requested = ?requested.guests,
                applied = ?reservation.guests,
                "guest split normalized"
            );
            adjustments.push(Adjustment {
                position,
                occupancy: reservation.occupancy,
                requested: requested.guests,
                applied: reservation.guests,
            });
        }
    }

    let markup = request.markup.unwrap_or(config.pricing.default_markup);
    let quote = match request.stay {
        Some(stay) => {
            let nights = stay.nights().context("Invalid stay dates")?;
            aggregator.quote_stay(&draft, nights, request.line_items.clone(), &markup)?
        }
        None => aggregator.quote_draft(&draft, request.line_items.clone(), &markup)?,
    };

    info!(
        quote_id = %quote.id,
        rooms = draft.len(),
        selling_cents = quote.price.selling_cents,
        "quote ready"
    );

    let submission = quote.submission(&draft);
    Ok(QuoteResponse {
        quote,
        submission,
        adjustments,
    })
}
