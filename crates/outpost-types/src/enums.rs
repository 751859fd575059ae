//! Enumeration types for the Outpost village economy.
//!
//! Resource kinds are a closed set. Every per-kind value in the workspace is
//! carried in a [`ResourceMap`](crate::ResourceMap) keyed by [`ResourceKind`]
//! so that no computation can silently miss a kind.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resource kinds
// ---------------------------------------------------------------------------

/// One of the four fungible currencies of the game.
///
/// Declaration order is the canonical order used for iteration and for
/// breaking ties (wood, clay, iron, crop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ResourceKind {
    /// Lumber from woodcutter fields.
    Wood,
    /// Clay from clay pits.
    Clay,
    /// Iron from iron mines.
    Iron,
    /// Crop from croplands; feeds the population and troops.
    Crop,
}

impl ResourceKind {
    /// Every kind, in canonical order.
    pub const ALL: [Self; 4] = [Self::Wood, Self::Clay, Self::Iron, Self::Crop];

    /// The lowercase identifier used in persisted rows and JSON payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Clay => "clay",
            Self::Iron => "iron",
            Self::Crop => "crop",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name one of the four resource kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid resource kind: {0:?}")]
pub struct ParseKindError(pub String);

impl FromStr for ResourceKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseKindError(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Storage buildings
// ---------------------------------------------------------------------------

/// A building that holds resource stock.
///
/// The warehouse stores wood, clay and iron; the granary stores crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum StorageBuilding {
    /// Stores wood, clay and iron.
    Warehouse,
    /// Stores crop.
    Granary,
}

impl StorageBuilding {
    /// The storage building that backs `kind`.
    pub const fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Crop => Self::Granary,
            ResourceKind::Wood | ResourceKind::Clay | ResourceKind::Iron => Self::Warehouse,
        }
    }

    /// Whether this building stores `kind`.
    pub fn backs(self, kind: ResourceKind) -> bool {
        Self::for_kind(kind) == self
    }
}

// ---------------------------------------------------------------------------
// Building categories
// ---------------------------------------------------------------------------

/// Which village statistic a building's bonus curve feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum BuildingCategory {
    /// Contributes to the aggregate defensive bonus.
    Defense,
    /// Boosts production of one resource kind.
    Production,
    /// Speeds up troop training.
    Training,
    /// Defends against enemy scouts.
    Espionage,
    /// Hides a share of stock from raiders.
    Protection,
}

impl BuildingCategory {
    /// The lowercase identifier used in catalog files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Defense => "defense",
            Self::Production => "production",
            Self::Training => "training",
            Self::Espionage => "espionage",
            Self::Protection => "protection",
        }
    }
}

impl fmt::Display for BuildingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Recommendation priority
// ---------------------------------------------------------------------------

/// Urgency of an upgrade recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Priority {
    /// The building is missing or contributes too little.
    High,
    /// The building is below target but already pulling its weight.
    Low,
}
