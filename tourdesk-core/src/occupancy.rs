use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// Room-capacity category a reservation is booked under
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyType {
    Single,
    Double,
    Triple,
    Quad,
}

impl OccupancyType {
    pub const ALL: [OccupancyType; 4] = [
        OccupancyType::Single,
        OccupancyType::Double,
        OccupancyType::Triple,
        OccupancyType::Quad,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OccupancyType::Single => "single",
            OccupancyType::Double => "double",
            OccupancyType::Triple => "triple",
            OccupancyType::Quad => "quad",
        }
    }
}

impl fmt::Display for OccupancyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OccupancyType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(OccupancyType::Single),
            "double" => Ok(OccupancyType::Double),
            "triple" => Ok(OccupancyType::Triple),
            "quad" => Ok(OccupancyType::Quad),
            _ => Err(CoreError::UnknownOccupancy(s.to_string())),
        }
    }
}

/// Capacity bounds for one occupancy type.
///
/// `min_occupancy` and `max_occupancy` bound adults + children;
/// infants are counted separately against `max_infants`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OccupancyLimits {
    pub min_occupancy: u32,
    pub max_occupancy: u32,
    pub max_infants: u32,
}

impl OccupancyLimits {
    pub const fn new(min_occupancy: u32, max_occupancy: u32, max_infants: u32) -> Self {
        Self {
            min_occupancy,
            max_occupancy,
            max_infants,
        }
    }
}

/// Occupancy limits keyed by type.
///
/// Injected into the allocator at construction so tests can swap in
/// their own table. Not configurable per room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OccupancyTable {
    limits: BTreeMap<OccupancyType, OccupancyLimits>,
}

impl OccupancyTable {
    /// Build a table, rejecting entries where `1 <= min <= max` does not hold
    pub fn new(
        entries: impl IntoIterator<Item = (OccupancyType, OccupancyLimits)>,
    ) -> CoreResult<Self> {
        let mut limits = BTreeMap::new();

        for (tag, entry) in entries {
            if entry.min_occupancy == 0 {
                return Err(CoreError::InvalidLimits {
                    tag: tag.to_string(),
                    reason: "minimum occupancy must be at least 1".to_string(),
                });
            }
            if entry.min_occupancy > entry.max_occupancy {
                return Err(CoreError::InvalidLimits {
                    tag: tag.to_string(),
                    reason: format!(
                        "minimum occupancy {} exceeds maximum {}",
                        entry.min_occupancy, entry.max_occupancy
                    ),
                });
            }
            limits.insert(tag, entry);
        }

        Ok(Self { limits })
    }

    /// The system-wide constants used by every booking context
    pub fn standard() -> Self {
        let limits = BTreeMap::from([
            (OccupancyType::Single, OccupancyLimits::new(1, 1, 1)),
            (OccupancyType::Double, OccupancyLimits::new(2, 2, 2)),
            (OccupancyType::Triple, OccupancyLimits::new(3, 3, 2)),
            (OccupancyType::Quad, OccupancyLimits::new(4, 4, 2)),
        ]);
        Self { limits }
    }

    pub fn limits(&self, tag: OccupancyType) -> CoreResult<&OccupancyLimits> {
        self.limits.get(&tag).ok_or_else(|| {
            tracing::warn!(occupancy = %tag, "occupancy type missing from limits table");
            CoreError::UnknownOccupancy(tag.to_string())
        })
    }

    pub fn contains(&self, tag: OccupancyType) -> bool {
        self.limits.contains_key(&tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OccupancyType, &OccupancyLimits)> {
        self.limits.iter().map(|(tag, limits)| (*tag, limits))
    }
}

impl Default for OccupancyTable {
    fn default() -> Self {
        Self::standard()
    }
}
