use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tourdesk_core::{OccupancyTable, OccupancyType};
use uuid::Uuid;

use crate::pricing::PricingLineItem;
use crate::{CatalogError, CatalogResult};

/// Nightly per-traveler cost of a room under one occupancy type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapacityPrice {
    pub adult_cents: i64,
    #[serde(default)]
    pub child_cents: Option<i64>,
    #[serde(default)]
    pub infant_cents: Option<i64>,
}

impl CapacityPrice {
    pub fn adult_only(adult_cents: i64) -> Self {
        Self {
            adult_cents,
            child_cents: None,
            infant_cents: None,
        }
    }

    fn is_negative(&self) -> bool {
        [Some(self.adult_cents), self.child_cents, self.infant_cents]
            .into_iter()
            .flatten()
            .any(|cents| cents < 0)
    }
}

/// Hotel room as supplied by the inventory API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDefinition {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// Ordered; the first entry is the room's default occupancy
    pub supported_occupancies: Vec<OccupancyType>,
    #[serde(default)]
    pub capacity_prices: BTreeMap<OccupancyType, CapacityPrice>,
}

impl RoomDefinition {
    pub fn new(
        name: impl Into<String>,
        supported_occupancies: Vec<OccupancyType>,
        capacity_prices: BTreeMap<OccupancyType, CapacityPrice>,
    ) -> CatalogResult<Self> {
        let room = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            supported_occupancies,
            capacity_prices,
        };
        room.validate()?;
        Ok(room)
    }

    /// Non-empty, duplicate-free, and priced (never negatively) for every
    /// supported type
    pub fn validate(&self) -> CatalogResult<()> {
        if self.supported_occupancies.is_empty() {
            return Err(CatalogError::EmptySupportedOccupancies(self.name.clone()));
        }

        if let Some((occupancy, price)) = self.capacity_prices.iter().find(|(_, p)| p.is_negative()) {
            return Err(CatalogError::NegativeAmount(format!(
                "room {} {occupancy} capacity price {price:?}",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for occupancy in &self.supported_occupancies {
            if !seen.insert(*occupancy) {
                return Err(CatalogError::DuplicateOccupancy {
                    room: self.name.clone(),
                    occupancy: *occupancy,
                });
            }
            if !self.capacity_prices.contains_key(occupancy) {
                return Err(CatalogError::MissingCapacityPrice {
                    room: self.name.clone(),
                    occupancy: *occupancy,
                });
            }
        }

        Ok(())
    }

    /// Every supported type must exist in the injected limits table
    pub fn validate_against(&self, table: &OccupancyTable) -> CatalogResult<()> {
        self.validate()?;
        for occupancy in &self.supported_occupancies {
            table.limits(*occupancy)?;
        }
        Ok(())
    }

    pub fn supports(&self, occupancy: OccupancyType) -> bool {
        self.supported_occupancies.contains(&occupancy)
    }

    pub fn default_occupancy(&self) -> CatalogResult<OccupancyType> {
        self.supported_occupancies
            .first()
            .copied()
            .ok_or_else(|| CatalogError::EmptySupportedOccupancies(self.name.clone()))
    }

    pub fn capacity_price(&self, occupancy: OccupancyType) -> CatalogResult<&CapacityPrice> {
        self.capacity_prices
            .get(&occupancy)
            .ok_or_else(|| CatalogError::MissingCapacityPrice {
                room: self.name.clone(),
                occupancy,
            })
    }

    /// Hotel line item for a stay in this room under `occupancy`
    pub fn hotel_line_item(&self, occupancy: OccupancyType, nights: u32) -> CatalogResult<PricingLineItem> {
        let price = self.capacity_price(occupancy)?;
        Ok(PricingLineItem {
            cost_per_child_cents: price.child_cents,
            cost_per_infant_cents: price.infant_cents,
            ..PricingLineItem::hotel(
                format!("{} ({})", self.name, occupancy),
                price.adult_cents,
                nights,
            )
        })
    }
}
