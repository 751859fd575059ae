//! Core records exchanged with the presentation layer.
//!
//! Everything here is plain data: villages as snapshots handed in by the
//! persistence layer, and reports computed from them. Values are raw
//! decimals; rounding and number formatting happen at render time.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Priority, ResourceKind};
use crate::ids::VillageId;
use crate::resources::ResourceMap;

// ---------------------------------------------------------------------------
// Building keys
// ---------------------------------------------------------------------------

/// Catalog identifier of a building type (e.g. `wall`, `cranny`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct BuildingKey(pub String);

impl BuildingKey {
    /// Wrap a catalog identifier.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for BuildingKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BuildingKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for BuildingKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

// ---------------------------------------------------------------------------
// Village snapshot
// ---------------------------------------------------------------------------

/// The building levels of one village at the time of a request.
///
/// Buildings absent from `buildings` are treated as level 0 (not built).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Village {
    /// Village identifier.
    pub id: VillageId,
    /// Display name chosen by the player.
    pub name: String,
    /// Current level of each constructed building.
    #[serde(default)]
    pub buildings: BTreeMap<BuildingKey, u32>,
}

impl Village {
    /// Create a village with no buildings.
    pub fn new(id: VillageId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            buildings: BTreeMap::new(),
        }
    }

    /// Builder-style setter for one building level.
    #[must_use]
    pub fn with_building(mut self, key: impl Into<BuildingKey>, level: u32) -> Self {
        self.buildings.insert(key.into(), level);
        self
    }

    /// Current level of `key`, or 0 if the building does not exist.
    pub fn level(&self, key: &BuildingKey) -> u32 {
        self.buildings.get(key).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Defense report
// ---------------------------------------------------------------------------

/// One defense building's contribution to the aggregate bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BuildingDetail {
    /// Catalog key.
    pub building_key: BuildingKey,
    /// Display name from the catalog.
    pub building_name: String,
    /// Current level (0 when not built).
    pub level: u32,
    /// Raw additive bonus at `level`, as a fraction.
    #[ts(as = "String")]
    pub defense_bonus: Decimal,
    /// Share of the village's total raw bonus, 0 to 100.
    #[ts(as = "String")]
    pub defense_percentage: Decimal,
}

/// A suggested upgrade for a defense building below its target level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Recommendation {
    /// Building the recommendation is about.
    #[serde(rename = "type")]
    pub building_type: BuildingKey,
    /// Level at evaluation time.
    pub current_level: u32,
    /// Level the catalog considers adequate.
    pub target_level: u32,
    /// Player-facing message.
    pub message: String,
    /// Urgency.
    pub priority: Priority,
}

/// Derived defensive statistics for one village.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DefenseReport {
    /// Village the report was computed for.
    pub village_id: VillageId,
    /// Sum of all defense buildings' raw bonuses (0.35 means +35%).
    #[ts(as = "String")]
    pub defensive_bonus: Decimal,
    /// Chance to repel enemy scouts, 0 to 100.
    pub spy_defense: u32,
    /// Fraction of stock hidden from raiders, 0 to 1.
    #[ts(as = "String")]
    pub resource_protection: Decimal,
    /// Training speed bonus as a fraction.
    #[ts(as = "String")]
    pub training_speed_bonus: Decimal,
    /// Production bonus fraction per resource kind.
    #[ts(as = "ResourceMap<String>")]
    pub production_bonus: ResourceMap<Decimal>,
    /// Defense buildings in catalog order.
    pub building_details: Vec<BuildingDetail>,
    /// Upgrade suggestions in catalog order.
    pub recommendations: Vec<Recommendation>,
}

/// One row of an upgrade simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UpgradeStep {
    /// Hypothetical level of the simulated building.
    pub level: u32,
    /// The building's own bonus at `level`, as a percentage.
    #[ts(as = "String")]
    pub percentage: Decimal,
    /// Aggregate defensive bonus with the building at `level`.
    #[ts(as = "String")]
    pub total_defense: Decimal,
}

// ---------------------------------------------------------------------------
// Ledger summary
// ---------------------------------------------------------------------------

/// Snapshot of a resource ledger and every analytic derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LedgerSummary {
    /// Current stock.
    #[ts(as = "ResourceMap<String>")]
    pub amounts: ResourceMap<Decimal>,
    /// Units produced per hour.
    #[ts(as = "ResourceMap<String>")]
    pub production: ResourceMap<Decimal>,
    /// Maximum storable stock.
    #[ts(as = "ResourceMap<String>")]
    pub capacity: ResourceMap<Decimal>,
    /// Level of the storage building backing each kind.
    pub storage_levels: ResourceMap<u32>,
    /// Sum of `amounts`.
    #[ts(as = "String")]
    pub total_amount: Decimal,
    /// Sum of `capacity`.
    #[ts(as = "String")]
    pub total_capacity: Decimal,
    /// Percentage of total capacity in use, 0 to 100.
    #[ts(as = "String")]
    pub utilization_percentage: Decimal,
    /// Whether utilization is at or above the nearly-full threshold.
    pub storage_nearly_full: bool,
    /// Largest amount divided by smallest amount.
    #[ts(as = "String")]
    pub resource_balance: Decimal,
    /// Whether the balance ratio is under the balanced threshold.
    pub balanced: bool,
    /// Kind with the largest stock.
    pub most_abundant: ResourceKind,
    /// Kind with the smallest stock.
    pub least_abundant: ResourceKind,
    /// Sum of `production`.
    #[ts(as = "String")]
    pub total_production: Decimal,
    /// Total production divided by total capacity.
    #[ts(as = "String")]
    pub efficiency: Decimal,
    /// Hours until the fastest-filling kind is full.
    #[ts(as = "String")]
    pub time_to_fill_hours: Decimal,
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

/// Everything the village screen shows, computed for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VillageOverview {
    /// Village identifier.
    pub village_id: VillageId,
    /// Village display name.
    pub village_name: String,
    /// Resource ledger analytics.
    pub resources: LedgerSummary,
    /// Defense evaluation.
    pub defense: DefenseReport,
    /// Hourly production after building bonuses.
    #[ts(as = "ResourceMap<String>")]
    pub effective_production: ResourceMap<Decimal>,
}
