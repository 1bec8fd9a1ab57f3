use serde::{Deserialize, Serialize};
use tourdesk_core::GuestCount;

use crate::{CatalogError, CatalogResult};

/// Inventory component a line item prices
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Hotel,
    Flight,
    Transport,
    Activity,
}

/// One priced component of a package or offer.
///
/// Costs are per traveler in cents. Hotel costs are nightly and get
/// multiplied by `nights`; every other resource is a one-time amount and
/// `nights` is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingLineItem {
    pub resource_type: ResourceType,
    #[serde(default)]
    pub name: String,
    pub cost_per_adult_cents: i64,
    #[serde(default)]
    pub cost_per_child_cents: Option<i64>,
    #[serde(default)]
    pub cost_per_infant_cents: Option<i64>,
    #[serde(default)]
    pub nights: u32,
}

impl PricingLineItem {
    pub fn hotel(name: impl Into<String>, cost_per_adult_cents: i64, nights: u32) -> Self {
        Self {
            resource_type: ResourceType::Hotel,
            name: name.into(),
            cost_per_adult_cents,
            cost_per_child_cents: None,
            cost_per_infant_cents: None,
            nights,
        }
    }

    /// One-time component (flight, transport, activity)
    pub fn flat(resource_type: ResourceType, name: impl Into<String>, cost_per_adult_cents: i64) -> Self {
        Self {
            resource_type,
            name: name.into(),
            cost_per_adult_cents,
            cost_per_child_cents: None,
            cost_per_infant_cents: None,
            nights: 0,
        }
    }

    pub fn with_child_cost(mut self, cents: i64) -> Self {
        self.cost_per_child_cents = Some(cents);
        self
    }

    pub fn with_infant_cost(mut self, cents: i64) -> Self {
        self.cost_per_infant_cents = Some(cents);
        self
    }

    /// Every cost tier must be zero or positive
    pub fn validate(&self) -> CatalogResult<()> {
        let tiers = [
            ("adult", Some(self.cost_per_adult_cents)),
            ("child", self.cost_per_child_cents),
            ("infant", self.cost_per_infant_cents),
        ];
        for (label, cents) in tiers {
            if let Some(cents) = cents.filter(|c| *c < 0) {
                return Err(CatalogError::NegativeAmount(format!(
                    "{} {label} cost {cents}",
                    self.name
                )));
            }
        }
        Ok(())
    }

    /// How many times the per-traveler cost is charged
    pub fn multiplier(&self) -> i64 {
        match self.resource_type {
            ResourceType::Hotel => i64::from(self.nights),
            _ => 1,
        }
    }
}

/// Resolved per-unit prices for each traveler type
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceTiers {
    pub adult_cents: i64,
    pub child_cents: i64,
    pub infant_cents: i64,
}

impl PriceTiers {
    fn scaled(&self, factor: i64) -> CatalogResult<Self> {
        Ok(Self {
            adult_cents: mul_cents(self.adult_cents, factor)?,
            child_cents: mul_cents(self.child_cents, factor)?,
            infant_cents: mul_cents(self.infant_cents, factor)?,
        })
    }

    pub fn checked_add(&self, rhs: &PriceTiers) -> CatalogResult<PriceTiers> {
        Ok(PriceTiers {
            adult_cents: add_cents(self.adult_cents, rhs.adult_cents)?,
            child_cents: add_cents(self.child_cents, rhs.child_cents)?,
            infant_cents: add_cents(self.infant_cents, rhs.infant_cents)?,
        })
    }
}

/// Subtotals per traveler type
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TravelerBreakdown {
    pub adults_cents: i64,
    pub children_cents: i64,
    pub infants_cents: i64,
}

impl TravelerBreakdown {
    pub fn total(&self) -> CatalogResult<i64> {
        add_cents(add_cents(self.adults_cents, self.children_cents)?, self.infants_cents)
    }

    pub fn checked_add(&self, rhs: &TravelerBreakdown) -> CatalogResult<TravelerBreakdown> {
        Ok(TravelerBreakdown {
            adults_cents: add_cents(self.adults_cents, rhs.adults_cents)?,
            children_cents: add_cents(self.children_cents, rhs.children_cents)?,
            infants_cents: add_cents(self.infants_cents, rhs.infants_cents)?,
        })
    }
}

/// Fallback ratios applied to the adult cost when a tier is missing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingConfig {
    /// Child price as a share of the adult price (30% discount)
    #[serde(default = "default_child_ratio")]
    pub child_ratio: f64,

    /// Infant price as a share of the adult price (70% discount)
    #[serde(default = "default_infant_ratio")]
    pub infant_ratio: f64,
}

fn default_child_ratio() -> f64 { 0.7 }
fn default_infant_ratio() -> f64 { 0.3 }

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            child_ratio: default_child_ratio(),
            infant_ratio: default_infant_ratio(),
        }
    }
}

impl PricingConfig {
    pub fn validate(&self) -> CatalogResult<()> {
        for (label, ratio) in [("child", self.child_ratio), ("infant", self.infant_ratio)] {
            if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
                return Err(CatalogError::InvalidRatio(format!(
                    "{label} ratio {ratio} must be within [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Line-item cost calculator
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> CatalogResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Fill in missing child/infant tiers from the adult price
    pub fn resolve_tiers(&self, item: &PricingLineItem) -> PriceTiers {
        let adult = item.cost_per_adult_cents;
        if item.cost_per_child_cents.is_none() || item.cost_per_infant_cents.is_none() {
            tracing::trace!(item = %item.name, "deriving missing tiers from adult price");
        }
        PriceTiers {
            adult_cents: adult,
            child_cents: item
                .cost_per_child_cents
                .unwrap_or_else(|| round_cents(adult as f64 * self.config.child_ratio)),
            infant_cents: item
                .cost_per_infant_cents
                .unwrap_or_else(|| round_cents(adult as f64 * self.config.infant_ratio)),
        }
    }

    /// Per-traveler unit price of an item across its whole duration.
    ///
    /// Rejects negative costs before anything is multiplied.
    pub fn unit_cost(&self, item: &PricingLineItem) -> CatalogResult<PriceTiers> {
        item.validate()?;
        self.resolve_tiers(item).scaled(item.multiplier())
    }

    pub fn line_item_breakdown(
        &self,
        item: &PricingLineItem,
        guests: &GuestCount,
    ) -> CatalogResult<TravelerBreakdown> {
        let unit = self.unit_cost(item)?;
        let breakdown = TravelerBreakdown {
            adults_cents: mul_cents(unit.adult_cents, i64::from(guests.adults))?,
            children_cents: mul_cents(unit.child_cents, i64::from(guests.children))?,
            infants_cents: mul_cents(unit.infant_cents, i64::from(guests.infants))?,
        };
        // A breakdown is only handed out when its total is representable
        breakdown.total()?;
        Ok(breakdown)
    }

    pub fn compute_line_item_cost(&self, item: &PricingLineItem, guests: &GuestCount) -> CatalogResult<i64> {
        self.line_item_breakdown(item, guests)?.total()
    }
}

/// Round a fractional cent amount half away from zero
pub fn round_cents(amount: f64) -> i64 {
    amount.round() as i64
}

pub(crate) fn add_cents(a: i64, b: i64) -> CatalogResult<i64> {
    a.checked_add(b)
        .ok_or_else(|| CatalogError::AmountOverflow(format!("{a} + {b}")))
}

fn mul_cents(a: i64, b: i64) -> CatalogResult<i64> {
    a.checked_mul(b)
        .ok_or_else(|| CatalogError::AmountOverflow(format!("{a} * {b}")))
}
