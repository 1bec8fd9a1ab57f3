use tourdesk_booking::{AllocationError, BookingDraft};
use tourdesk_catalog::{
    apply_markup, CatalogResult, MarkupPolicy, PriceTiers, PricingEngine, PricingLineItem,
    TravelerBreakdown,
};
use tourdesk_catalog::pricing::round_cents;
use tourdesk_core::GuestCount;
use tracing::debug;

use crate::models::{PackagePrice, PackageQuote};
use crate::{OfferError, OfferResult};

/// Turns selected inventory into a sellable package price
#[derive(Debug, Clone, Default)]
pub struct PackageAggregator {
    pricing_engine: PricingEngine,
}

impl PackageAggregator {
    pub fn new(pricing_engine: PricingEngine) -> Self {
        Self { pricing_engine }
    }

    pub fn pricing_engine(&self) -> &PricingEngine {
        &self.pricing_engine
    }

    /// Sum line-item costs for the guests and apply the markup.
    ///
    /// The markup policy and every line item are validated up front; a
    /// malformed policy or a negative cost is rejected before anything is
    /// summed.
    pub fn aggregate_package_price(
        &self,
        line_items: &[PricingLineItem],
        guests: &GuestCount,
        markup: &MarkupPolicy,
    ) -> OfferResult<PackagePrice> {
        markup.validate()?;
        validate_items(line_items)?;

        let breakdown = self.breakdown(line_items, guests)?;
        let cost_cents = breakdown.total()?;
        let selling_cents = apply_markup(cost_cents, markup)?;

        let travelers = guests.total().max(1);
        let per_person_cents = round_cents(selling_cents as f64 / f64::from(travelers));

        let unit_cost = line_items
            .iter()
            .try_fold(PriceTiers::default(), |acc, item| -> CatalogResult<PriceTiers> {
                acc.checked_add(&self.pricing_engine.unit_cost(item)?)
            })?;
        let unit_selling = marked_up(&unit_cost, markup)?;

        debug!(
            items = line_items.len(),
            cost_cents,
            selling_cents,
            per_person_cents,
            "package priced"
        );

        Ok(PackagePrice {
            cost_cents,
            selling_cents,
            per_person_cents,
            breakdown,
            unit_selling,
            markup: *markup,
        })
    }

    /// Price every guest in a draft against the selected line items
    pub fn quote_draft(
        &self,
        draft: &BookingDraft,
        line_items: Vec<PricingLineItem>,
        markup: &MarkupPolicy,
    ) -> OfferResult<PackageQuote> {
        if draft.is_empty() {
            return Err(OfferError::EmptyDraft);
        }

        let guests = draft.guest_totals();
        let price = self.aggregate_package_price(&line_items, &guests, markup)?;
        let rooms = draft.iter().cloned().collect();

        Ok(PackageQuote::new(rooms, guests, line_items, price))
    }

    /// Hotel line items for every room in the draft, one per reservation.
    ///
    /// Each item is priced for that room's own guests, so these are meant
    /// to be aggregated per room rather than against the draft totals.
    pub fn room_line_items(
        &self,
        draft: &BookingDraft,
        nights: u32,
    ) -> OfferResult<Vec<(GuestCount, PricingLineItem)>> {
        draft
            .iter()
            .map(|reservation| -> OfferResult<(GuestCount, PricingLineItem)> {
                let room = draft.rooms().get(reservation.room_index).ok_or(
                    AllocationError::UnknownRoom {
                        index: reservation.room_index,
                        available: draft.rooms().len(),
                    },
                )?;
                let item = room.hotel_line_item(reservation.occupancy, nights)?;
                Ok((reservation.guests, item))
            })
            .collect()
    }

    /// Price a draft where each room's hotel cost applies only to its own
    /// guests, plus shared line items (flights, transfers, activities)
    /// applied to everyone.
    pub fn quote_stay(
        &self,
        draft: &BookingDraft,
        nights: u32,
        shared_items: Vec<PricingLineItem>,
        markup: &MarkupPolicy,
    ) -> OfferResult<PackageQuote> {
        if draft.is_empty() {
            return Err(OfferError::EmptyDraft);
        }
        markup.validate()?;
        validate_items(&shared_items)?;

        let guests = draft.guest_totals();
        let rooms = self.room_line_items(draft, nights)?;

        let mut breakdown = self.breakdown(&shared_items, &guests)?;
        for (room_guests, item) in &rooms {
            let room_breakdown = self.pricing_engine.line_item_breakdown(item, room_guests)?;
            breakdown = breakdown.checked_add(&room_breakdown)?;
        }

        let cost_cents = breakdown.total()?;
        let selling_cents = apply_markup(cost_cents, markup)?;
        let per_person_cents = round_cents(selling_cents as f64 / f64::from(guests.total().max(1)));

        // Rooms price differently, so tiers are the average cost per traveler
        let unit_cost = average_tiers(&breakdown, &guests);
        let unit_selling = PriceTiers {
            adult_cents: marked_up_for(unit_cost.adult_cents, guests.adults, markup)?,
            child_cents: marked_up_for(unit_cost.child_cents, guests.children, markup)?,
            infant_cents: marked_up_for(unit_cost.infant_cents, guests.infants, markup)?,
        };

        let mut line_items: Vec<PricingLineItem> = rooms.into_iter().map(|(_, item)| item).collect();
        line_items.extend(shared_items);

        debug!(rooms = draft.len(), cost_cents, selling_cents, "stay priced");

        let price = PackagePrice {
            cost_cents,
            selling_cents,
            per_person_cents,
            breakdown,
            unit_selling,
            markup: *markup,
        };
        Ok(PackageQuote::new(draft.iter().cloned().collect(), guests, line_items, price))
    }

    fn breakdown(&self, line_items: &[PricingLineItem], guests: &GuestCount) -> OfferResult<TravelerBreakdown> {
        let breakdown = line_items
            .iter()
            .try_fold(TravelerBreakdown::default(), |acc, item| -> CatalogResult<TravelerBreakdown> {
                acc.checked_add(&self.pricing_engine.line_item_breakdown(item, guests)?)
            })?;
        Ok(breakdown)
    }
}

fn validate_items(line_items: &[PricingLineItem]) -> OfferResult<()> {
    for item in line_items {
        item.validate()?;
    }
    Ok(())
}

fn marked_up(tiers: &PriceTiers, markup: &MarkupPolicy) -> OfferResult<PriceTiers> {
    Ok(PriceTiers {
        adult_cents: apply_markup(tiers.adult_cents, markup)?,
        child_cents: apply_markup(tiers.child_cents, markup)?,
        infant_cents: apply_markup(tiers.infant_cents, markup)?,
    })
}

/// A traveler type nobody belongs to has no unit price, marked up or not
fn marked_up_for(unit_cents: i64, travelers: u32, markup: &MarkupPolicy) -> OfferResult<i64> {
    if travelers == 0 {
        return Ok(0);
    }
    Ok(apply_markup(unit_cents, markup)?)
}

fn average_tiers(breakdown: &TravelerBreakdown, guests: &GuestCount) -> PriceTiers {
    let average = |subtotal: i64, count: u32| {
        if count == 0 {
            0
        } else {
            round_cents(subtotal as f64 / f64::from(count))
        }
    };
    PriceTiers {
        adult_cents: average(breakdown.adults_cents, guests.adults),
        child_cents: average(breakdown.children_cents, guests.children),
        infant_cents: average(breakdown.infants_cents, guests.infants),
    }
}
