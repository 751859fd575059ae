//! The building catalog: an ordered, read-only registry of building
//! definitions.
//!
//! Declaration order is significant. Evaluations walk buildings in catalog
//! order, so reports and recommendations come out in the same order every
//! time.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use outpost_types::{BuildingCategory, BuildingKey, ResourceKind};

use crate::curve::BonusCurve;
use crate::error::CatalogError;

/// Static data for one building type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingDefinition {
    /// Catalog key.
    pub key: BuildingKey,
    /// Display name.
    pub name: String,
    /// Which statistic the curve feeds.
    pub category: BuildingCategory,
    /// Bonus per level.
    pub curve: BonusCurve,
    /// Highest buildable level.
    pub max_level: u32,
    /// Level below which the building is recommended for upgrade.
    pub target_level: u32,
    /// Boosted resource kind; set only for production buildings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceKind>,
}

impl BuildingDefinition {
    /// Bonus at `level`, or `None` on arithmetic overflow.
    pub fn bonus_at(&self, level: u32) -> Option<Decimal> {
        self.curve.value_at(level)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |reason| CatalogError::InvalidEntry {
            key: self.key.clone(),
            reason,
        };
        if self.key.as_str().is_empty() {
            return Err(invalid("key must not be empty"));
        }
        if self.max_level == 0 {
            return Err(invalid("max_level must be at least 1"));
        }
        if self.target_level > self.max_level {
            return Err(invalid("target_level exceeds max_level"));
        }
        match (self.category, self.resource) {
            (BuildingCategory::Production, None) => {
                return Err(invalid("production building must name a resource"));
            }
            (
                BuildingCategory::Defense
                | BuildingCategory::Training
                | BuildingCategory::Espionage
                | BuildingCategory::Protection,
                Some(_),
            ) => return Err(invalid("only production buildings name a resource")),
            _ => {}
        }
        self.curve.validate(self.max_level).map_err(invalid)
    }
}

/// On-disk layout of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    buildings: Vec<BuildingDefinition>,
}

/// Ordered registry of [`BuildingDefinition`]s keyed by [`BuildingKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    buildings: Vec<BuildingDefinition>,
    index: BTreeMap<BuildingKey, usize>,
}

impl Catalog {
    /// Build a catalog from definitions, validating every entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] for an empty list,
    /// [`CatalogError::DuplicateKey`] when a key repeats, or
    /// [`CatalogError::InvalidEntry`] for an inconsistent definition.
    pub fn new(buildings: Vec<BuildingDefinition>) -> Result<Self, CatalogError> {
        if buildings.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut index = BTreeMap::new();
        for (position, def) in buildings.iter().enumerate() {
            def.validate()?;
            if index.insert(def.key.clone(), position).is_some() {
                return Err(CatalogError::DuplicateKey(def.key.clone()));
            }
        }
        Ok(Self { buildings, index })
    }

    /// Build a catalog from definitions known to be valid.
    pub(crate) fn assemble(buildings: Vec<BuildingDefinition>) -> Self {
        let index = buildings
            .iter()
            .enumerate()
            .map(|(position, def)| (def.key.clone(), position))
            .collect();
        Self { buildings, index }
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] for malformed YAML, or any validation
    /// error from [`Catalog::new`].
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yml::from_str(yaml)?;
        Self::new(file.buildings)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise
    /// the errors of [`Catalog::from_yaml`].
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml(&contents)?;
        tracing::info!(
            path = %path.display(),
            buildings = catalog.len(),
            "Loaded building catalog"
        );
        Ok(catalog)
    }

    /// Look up a building definition.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownBuildingKey`] if `key` is not defined.
    pub fn get(&self, key: &BuildingKey) -> Result<&BuildingDefinition, CatalogError> {
        self.index
            .get(key)
            .and_then(|&position| self.buildings.get(position))
            .ok_or_else(|| CatalogError::UnknownBuildingKey(key.clone()))
    }

    /// Whether `key` is defined.
    pub fn contains(&self, key: &BuildingKey) -> bool {
        self.index.contains_key(key)
    }

    /// All definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &BuildingDefinition> + '_ {
        self.buildings.iter()
    }

    /// Definitions of one category, in declaration order.
    pub fn in_category(
        &self,
        category: BuildingCategory,
    ) -> impl Iterator<Item = &BuildingDefinition> + '_ {
        self.buildings
            .iter()
            .filter(move |def| def.category == category)
    }

    /// Number of definitions.
    pub const fn len(&self) -> usize {
        self.buildings.len()
    }

    /// Always `false` for a validated catalog.
    pub const fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn def(key: &str, category: BuildingCategory) -> BuildingDefinition {
        BuildingDefinition {
            key: BuildingKey::from(key),
            name: key.to_uppercase(),
            category,
            curve: BonusCurve::Linear { per_level: dec!(0.01) },
            max_level: 10,
            target_level: 5,
            resource: None,
        }
    }

    #[test]
    fn lookup_and_order() {
        let catalog = Catalog::new(vec![
            def("wall", BuildingCategory::Defense),
            def("cranny", BuildingCategory::Protection),
            def("moat", BuildingCategory::Defense),
        ]);
        assert!(catalog.is_ok());
        let Ok(catalog) = catalog else { return };

        assert_eq!(catalog.len(), 3);
        assert!(catalog.get(&BuildingKey::from("cranny")).is_ok());
        let defense: Vec<&str> = catalog
            .in_category(BuildingCategory::Defense)
            .map(|d| d.key.as_str())
            .collect();
        assert_eq!(defense, ["wall", "moat"]);
    }

    #[test]
    fn unknown_key_is_an_error() {
        let catalog = Catalog::assemble(vec![def("wall", BuildingCategory::Defense)]);
        let err = catalog.get(&BuildingKey::from("keep"));
        assert!(matches!(err, Err(CatalogError::UnknownBuildingKey(k)) if k.as_str() == "keep"));
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let result = Catalog::new(vec![
            def("wall", BuildingCategory::Defense),
            def("wall", BuildingCategory::Defense),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateKey(_))));
    }

    #[test]
    fn rejects_target_above_max() {
        let mut bad = def("wall", BuildingCategory::Defense);
        bad.target_level = 11;
        assert!(matches!(
            Catalog::new(vec![bad]),
            Err(CatalogError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn production_requires_resource() {
        let bad = def("sawmill", BuildingCategory::Production);
        assert!(Catalog::new(vec![bad]).is_err());

        let mut good = def("sawmill", BuildingCategory::Production);
        good.resource = Some(ResourceKind::Wood);
        assert!(Catalog::new(vec![good]).is_ok());

        let mut stray = def("wall", BuildingCategory::Defense);
        stray.resource = Some(ResourceKind::Wood);
        assert!(Catalog::new(vec![stray]).is_err());
    }

    #[test]
    fn parses_yaml_catalog() {
        let yaml = r#"
buildings:
  - key: wall
    name: City Wall
    category: defense
    curve: { kind: compound, rate: "0.03" }
    max_level: 20
    target_level: 10
  - key: sawmill
    name: Sawmill
    category: production
    resource: wood
    curve: { kind: table, values: ["0.05", "0.10"] }
    max_level: 2
    target_level: 2
"#;
        let catalog = Catalog::from_yaml(yaml);
        assert!(catalog.is_ok(), "{catalog:?}");
        let Ok(catalog) = catalog else { return };
        let sawmill = catalog.get(&BuildingKey::from("sawmill")).ok();
        assert_eq!(sawmill.and_then(|d| d.resource), Some(ResourceKind::Wood));
        assert_eq!(sawmill.and_then(|d| d.bonus_at(2)), Some(dec!(0.10)));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            Catalog::from_yaml("buildings: [ {key: wall"),
            Err(CatalogError::Yaml { .. })
        ));
    }
}
