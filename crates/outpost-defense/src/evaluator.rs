//! The defense evaluator.
//!
//! Walks the catalog in declaration order and reads each building's level
//! from the village snapshot:
//!
//! - defense buildings sum into `defensive_bonus`, and each one's share of
//!   that sum becomes its `defense_percentage`
//! - espionage buildings sum into `spy_defense` (whole percent, max 100)
//! - protection buildings sum into `resource_protection` (max 1)
//! - the first training building gives `training_speed_bonus`
//! - production buildings give the per-kind production bonus

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use outpost_catalog::{BuildingDefinition, Catalog};
use outpost_types::{
    BuildingCategory, BuildingDetail, BuildingKey, DefenseReport, Priority, Recommendation,
    ResourceKind, ResourceMap, UpgradeStep, Village,
};

use crate::DefenseError;

/// Tunables for recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefenseSettings {
    /// Share of the total defense bonus (0 to 100) below which an
    /// under-target building is a high-priority upgrade (default: 20).
    pub min_share_percent: Decimal,
}

impl Default for DefenseSettings {
    fn default() -> Self {
        Self {
            min_share_percent: Decimal::from(20),
        }
    }
}

/// Computes defensive statistics from building levels.
///
/// Borrows the catalog; holds no state between calls.
#[derive(Debug, Clone, Copy)]
pub struct DefenseEvaluator<'a> {
    catalog: &'a Catalog,
    settings: DefenseSettings,
}

impl<'a> DefenseEvaluator<'a> {
    /// Create an evaluator over `catalog`.
    pub const fn new(catalog: &'a Catalog, settings: DefenseSettings) -> Self {
        Self { catalog, settings }
    }

    /// The catalog this evaluator reads.
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Compute the full defense report for `village`.
    ///
    /// # Errors
    ///
    /// Returns [`DefenseError::UnknownBuildingKey`] if the village has a
    /// building the catalog does not define, or
    /// [`DefenseError::InvalidLevel`] if a level exceeds the building's
    /// maximum.
    pub fn evaluate(&self, village: &Village) -> Result<DefenseReport, DefenseError> {
        self.validate(village)?;

        let mut building_details = Vec::new();
        let mut defensive_bonus = Decimal::ZERO;
        for def in self.catalog.in_category(BuildingCategory::Defense) {
            let level = village.level(&def.key);
            let raw = bonus(def, level)?;
            defensive_bonus = defensive_bonus
                .checked_add(raw)
                .ok_or(DefenseError::ArithmeticOverflow)?;
            building_details.push(BuildingDetail {
                building_key: def.key.clone(),
                building_name: def.name.clone(),
                level,
                defense_bonus: raw,
                defense_percentage: Decimal::ZERO,
            });
        }
        for detail in &mut building_details {
            detail.defense_percentage = share_percent(detail.defense_bonus, defensive_bonus)?;
        }

        let spy_fraction = self.category_sum(village, BuildingCategory::Espionage)?;
        let spy_defense = spy_fraction
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(DefenseError::ArithmeticOverflow)?
            .floor()
            .to_u32()
            .map_or(100, |pct| pct.min(100));

        let resource_protection = self
            .category_sum(village, BuildingCategory::Protection)?
            .min(Decimal::ONE);

        let training_speed_bonus = self
            .catalog
            .in_category(BuildingCategory::Training)
            .next()
            .map_or(Ok(Decimal::ZERO), |def| bonus(def, village.level(&def.key)))?;

        let mut production_bonus = ResourceMap::splat(Decimal::ZERO);
        for kind in ResourceKind::ALL {
            *production_bonus.get_mut(kind) = self.production_sum(village, kind)?;
        }

        let mut report = DefenseReport {
            village_id: village.id,
            defensive_bonus,
            spy_defense,
            resource_protection,
            training_speed_bonus,
            production_bonus,
            building_details,
            recommendations: Vec::new(),
        };
        report.recommendations = self.recommend(&report)?;

        tracing::debug!(
            village_id = %village.id,
            defensive_bonus = %report.defensive_bonus,
            spy_defense = report.spy_defense,
            recommendations = report.recommendations.len(),
            "Evaluated village defense"
        );
        Ok(report)
    }

    /// Production bonus fraction for one resource kind.
    ///
    /// Independent of the defense bonus.
    ///
    /// # Errors
    ///
    /// Same as [`evaluate`](Self::evaluate).
    pub fn calculate_production_bonus(
        &self,
        village: &Village,
        kind: ResourceKind,
    ) -> Result<Decimal, DefenseError> {
        self.validate(village)?;
        self.production_sum(village, kind)
    }

    /// Simulate upgrading `key` from `from_level` to `to_level`.
    ///
    /// Returns one step per level in `from_level + 1 ..= to_level`. Each
    /// step's `total_defense` is the aggregate bonus with only `key` changed;
    /// every other building keeps its current level.
    ///
    /// # Errors
    ///
    /// Returns [`DefenseError::UnknownBuildingKey`] if `key` is not in the
    /// catalog, [`DefenseError::NotDefenseBuilding`] if it is not a defense
    /// building, and [`DefenseError::InvalidLevel`] if `from_level` exceeds
    /// `to_level` or `to_level` exceeds the building's maximum.
    pub fn simulate_building_upgrade(
        &self,
        village: &Village,
        key: &BuildingKey,
        from_level: u32,
        to_level: u32,
    ) -> Result<Vec<UpgradeStep>, DefenseError> {
        let target = self.catalog.get(key)?;
        if target.category != BuildingCategory::Defense {
            return Err(DefenseError::NotDefenseBuilding {
                building: key.clone(),
                category: target.category,
            });
        }
        self.validate(village)?;
        if from_level > to_level {
            return Err(DefenseError::InvalidLevel {
                building: Some(key.clone()),
                level: from_level.to_string(),
                reason: "start level is above end level",
            });
        }
        if to_level > target.max_level {
            return Err(DefenseError::InvalidLevel {
                building: Some(key.clone()),
                level: to_level.to_string(),
                reason: "above the building's maximum level",
            });
        }

        let mut steps = Vec::new();
        for level in from_level.saturating_add(1)..=to_level {
            let own = bonus(target, level)?;
            let total_defense = self.defense_total(|def| {
                if def.key == *key {
                    level
                } else {
                    village.level(&def.key)
                }
            })?;
            steps.push(UpgradeStep {
                level,
                percentage: own
                    .checked_mul(Decimal::ONE_HUNDRED)
                    .ok_or(DefenseError::ArithmeticOverflow)?,
                total_defense,
            });
        }
        Ok(steps)
    }

    /// Upgrade suggestions for every defense building below its target.
    ///
    /// A building is `high` priority when it is not built at all or its
    /// share of the defense bonus is below
    /// [`DefenseSettings::min_share_percent`]; otherwise `low`. Order
    /// follows `report.building_details`, which is catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`DefenseError::UnknownBuildingKey`] if a detail names a
    /// building the catalog does not define.
    pub fn recommend(&self, report: &DefenseReport) -> Result<Vec<Recommendation>, DefenseError> {
        let mut recommendations = Vec::new();
        for detail in &report.building_details {
            let def = self.catalog.get(&detail.building_key)?;
            if detail.level >= def.target_level {
                continue;
            }
            let priority = if detail.level == 0
                || detail.defense_percentage < self.settings.min_share_percent
            {
                Priority::High
            } else {
                Priority::Low
            };
            let message = if detail.level == 0 {
                format!(
                    "Build a {} to strengthen your defenses (target level {}).",
                    def.name, def.target_level
                )
            } else {
                format!(
                    "Upgrade the {} from level {} to level {}.",
                    def.name, detail.level, def.target_level
                )
            };
            recommendations.push(Recommendation {
                building_type: def.key.clone(),
                current_level: detail.level,
                target_level: def.target_level,
                message,
                priority,
            });
        }
        Ok(recommendations)
    }

    /// Check every building of `village` against the catalog.
    fn validate(&self, village: &Village) -> Result<(), DefenseError> {
        for (key, &level) in &village.buildings {
            let def = self.catalog.get(key)?;
            if level > def.max_level {
                return Err(DefenseError::InvalidLevel {
                    building: Some(key.clone()),
                    level: level.to_string(),
                    reason: "above the building's maximum level",
                });
            }
        }
        Ok(())
    }

    /// Aggregate defense bonus with levels supplied by `level_of`.
    fn defense_total(
        &self,
        level_of: impl Fn(&BuildingDefinition) -> u32,
    ) -> Result<Decimal, DefenseError> {
        self.catalog
            .in_category(BuildingCategory::Defense)
            .try_fold(Decimal::ZERO, |acc, def| {
                acc.checked_add(bonus(def, level_of(def))?)
                    .ok_or(DefenseError::ArithmeticOverflow)
            })
    }

    fn category_sum(
        &self,
        village: &Village,
        category: BuildingCategory,
    ) -> Result<Decimal, DefenseError> {
        self.catalog
            .in_category(category)
            .try_fold(Decimal::ZERO, |acc, def| {
                acc.checked_add(bonus(def, village.level(&def.key))?)
                    .ok_or(DefenseError::ArithmeticOverflow)
            })
    }

    fn production_sum(&self, village: &Village, kind: ResourceKind) -> Result<Decimal, DefenseError> {
        self.catalog
            .in_category(BuildingCategory::Production)
            .filter(|def| def.resource == Some(kind))
            .try_fold(Decimal::ZERO, |acc, def| {
                acc.checked_add(bonus(def, village.level(&def.key))?)
                    .ok_or(DefenseError::ArithmeticOverflow)
            })
    }
}

fn bonus(def: &BuildingDefinition, level: u32) -> Result<Decimal, DefenseError> {
    def.bonus_at(level).ok_or(DefenseError::ArithmeticOverflow)
}

/// `part / total * 100`, or 0 when `total` is 0.
fn share_percent(part: Decimal, total: Decimal) -> Result<Decimal, DefenseError> {
    if total.is_zero() {
        return Ok(Decimal::ZERO);
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(total))
        .ok_or(DefenseError::ArithmeticOverflow)
}
