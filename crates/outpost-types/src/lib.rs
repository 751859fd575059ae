//! Shared type definitions for the Outpost village economy core.
//!
//! This crate is the single source of truth for the data shapes exchanged
//! between the economy and defense crates and the presentation layer.
//! Types flow to `TypeScript` via `ts-rs` for the village screens.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers
//! - [`enums`] -- Resource kinds, storage buildings, building categories
//! - [`resources`] -- [`ResourceMap`], the fixed per-kind record
//! - [`structs`] -- Village snapshots and computed reports

pub mod enums;
pub mod ids;
pub mod resources;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{BuildingCategory, ParseKindError, Priority, ResourceKind, StorageBuilding};
pub use ids::VillageId;
pub use resources::ResourceMap;
pub use structs::{
    BuildingDetail, BuildingKey, DefenseReport, LedgerSummary, Recommendation, UpgradeStep,
    Village, VillageOverview,
};
