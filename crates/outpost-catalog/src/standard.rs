//! The built-in building catalog.
//!
//! Used when no catalog file is configured. Built once per process and
//! shared by reference.

use std::sync::OnceLock;

use rust_decimal::Decimal;

use outpost_types::{BuildingCategory, BuildingKey, ResourceKind};

use crate::catalog::{BuildingDefinition, Catalog};
use crate::curve::BonusCurve;

/// Return the process-wide standard catalog.
pub fn standard() -> &'static Catalog {
    static STANDARD: OnceLock<Catalog> = OnceLock::new();
    STANDARD.get_or_init(|| Catalog::assemble(standard_definitions()))
}

/// Definitions of the standard catalog, in declaration order.
pub fn standard_definitions() -> Vec<BuildingDefinition> {
    vec![
        // ---- Defense ----
        building(
            "wall",
            "City Wall",
            BuildingCategory::Defense,
            BonusCurve::Compound {
                rate: Decimal::new(3, 2), // 0.03
            },
            20,
            10,
        ),
        building(
            "tower",
            "Defense Tower",
            BuildingCategory::Defense,
            BonusCurve::Table {
                values: [10, 20, 35, 50, 65, 80, 100, 120, 140, 160]
                    .into_iter()
                    .map(|permille| Decimal::new(permille, 3))
                    .collect(),
            },
            10,
            5,
        ),
        building(
            "moat",
            "Moat",
            BuildingCategory::Defense,
            BonusCurve::Linear {
                per_level: Decimal::new(2, 2), // 0.02
            },
            10,
            5,
        ),
        // ---- Espionage ----
        building(
            "lookout",
            "Lookout Post",
            BuildingCategory::Espionage,
            BonusCurve::Linear {
                per_level: Decimal::new(5, 2), // 0.05
            },
            20,
            10,
        ),
        // ---- Protection ----
        building(
            "cranny",
            "Cranny",
            BuildingCategory::Protection,
            BonusCurve::Linear {
                per_level: Decimal::new(4, 2), // 0.04
            },
            10,
            5,
        ),
        // ---- Training ----
        building(
            "barracks",
            "Barracks",
            BuildingCategory::Training,
            BonusCurve::Linear {
                per_level: Decimal::new(5, 2), // 0.05
            },
            20,
            10,
        ),
        // ---- Production ----
        production("sawmill", "Sawmill", ResourceKind::Wood),
        production("brickyard", "Brickyard", ResourceKind::Clay),
        production("iron_foundry", "Iron Foundry", ResourceKind::Iron),
        production("grain_mill", "Grain Mill", ResourceKind::Crop),
        production("bakery", "Bakery", ResourceKind::Crop),
    ]
}

fn building(
    key: &str,
    name: &str,
    category: BuildingCategory,
    curve: BonusCurve,
    max_level: u32,
    target_level: u32,
) -> BuildingDefinition {
    BuildingDefinition {
        key: BuildingKey::from(key),
        name: name.to_owned(),
        category,
        curve,
        max_level,
        target_level,
        resource: None,
    }
}

/// Production buildings add 5% per level up to level 5.
fn production(key: &str, name: &str, resource: ResourceKind) -> BuildingDefinition {
    BuildingDefinition {
        resource: Some(resource),
        ..building(
            key,
            name,
            BuildingCategory::Production,
            BonusCurve::Linear {
                per_level: Decimal::new(5, 2),
            },
            5,
            5,
        )
    }
}
