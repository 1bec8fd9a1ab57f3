use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tourdesk_booking::{BookingDraft, RoomReservation};
use tourdesk_catalog::{MarkupPolicy, PriceTiers, PricingLineItem, TravelerBreakdown};
use tourdesk_core::{GuestCount, OccupancyType};
use uuid::Uuid;

/// Aggregated price of a package for a given guest split
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackagePrice {
    pub cost_cents: i64,
    pub selling_cents: i64,
    pub per_person_cents: i64,
    /// Cost subtotals per traveler type; sums to `cost_cents`
    pub breakdown: TravelerBreakdown,
    /// Marked-up price of one traveler of each type across all line items
    pub unit_selling: PriceTiers,
    pub markup: MarkupPolicy,
}

impl PackagePrice {
    pub fn margin_cents(&self) -> i64 {
        self.selling_cents - self.cost_cents
    }
}

/// A priced package built from a booking draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageQuote {
    pub id: Uuid,
    pub rooms: Vec<RoomReservation>,
    pub guests: GuestCount,
    pub line_items: Vec<PricingLineItem>,
    pub price: PackagePrice,
    pub created_at: DateTime<Utc>,
}

impl PackageQuote {
    pub fn new(
        rooms: Vec<RoomReservation>,
        guests: GuestCount,
        line_items: Vec<PricingLineItem>,
        price: PackagePrice,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            rooms,
            guests,
            line_items,
            price,
            created_at: Utc::now(),
        }
    }

    /// Plain payload for the booking-creation API
    pub fn submission(&self, draft: &BookingDraft) -> BookingSubmission {
        let rooms = self
            .rooms
            .iter()
            .map(|reservation| SubmittedRoom {
                room_name: draft
                    .rooms()
                    .get(reservation.room_index)
                    .map(|room| room.name.clone())
                    .unwrap_or_default(),
                occupancy: reservation.occupancy,
                adults: reservation.adults(),
                children: reservation.children(),
                infants: reservation.infants(),
            })
            .collect();

        BookingSubmission {
            quote_id: self.id,
            rooms,
            adults: self.guests.adults,
            children: self.guests.children,
            infants: self.guests.infants,
            total_cents: self.price.selling_cents,
            per_person_cents: self.price.per_person_cents,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmittedRoom {
    pub room_name: String,
    pub occupancy: OccupancyType,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

/// Guest split and totals exactly as computed, handed to booking creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingSubmission {
    pub quote_id: Uuid,
    pub rooms: Vec<SubmittedRoom>,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
    pub total_cents: i64,
    pub per_person_cents: i64,
}
