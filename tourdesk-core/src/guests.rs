use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Guest split for a room or a whole booking
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GuestCount {
    pub adults: u32,
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
}

impl GuestCount {
    pub const fn new(adults: u32, children: u32, infants: u32) -> Self {
        Self {
            adults,
            children,
            infants,
        }
    }

    /// Adults plus children; the figure capacity limits apply to
    pub fn occupants(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    pub fn total(&self) -> u32 {
        self.occupants().saturating_add(self.infants)
    }
}

impl Add for GuestCount {
    type Output = GuestCount;

    fn add(self, rhs: GuestCount) -> GuestCount {
        GuestCount {
            adults: self.adults.saturating_add(rhs.adults),
            children: self.children.saturating_add(rhs.children),
            infants: self.infants.saturating_add(rhs.infants),
        }
    }
}
