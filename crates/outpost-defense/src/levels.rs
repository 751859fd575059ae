//! Intake of building levels as the game server sends them.
//!
//! Levels arrive as JSON numbers. Anything that is not a finite,
//! non-negative whole number within the building's range is rejected with
//! [`DefenseError::InvalidLevel`] before evaluation starts.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use outpost_catalog::Catalog;
use outpost_types::{BuildingKey, Village, VillageId};

use crate::DefenseError;

/// Convert a raw numeric level to a building level.
///
/// # Errors
///
/// Returns [`DefenseError::InvalidLevel`] for NaN, infinities, negative or
/// fractional values, and values beyond `u32::MAX`.
pub fn level_from_raw(raw: f64) -> Result<u32, DefenseError> {
    checked_level(None, raw)
}

/// Build a [`Village`] from raw `(building key, level)` pairs.
///
/// # Errors
///
/// Returns [`DefenseError::UnknownBuildingKey`] for a key missing from the
/// catalog and [`DefenseError::InvalidLevel`] for a bad level or one above
/// the building's maximum.
pub fn village_from_raw<I, K>(
    catalog: &Catalog,
    id: VillageId,
    name: &str,
    levels: I,
) -> Result<Village, DefenseError>
where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<BuildingKey>,
{
    let mut village = Village::new(id, name);
    for (key, raw) in levels {
        let key = key.into();
        let def = catalog.get(&key)?;
        let level = checked_level(Some(&key), raw)?;
        if level > def.max_level {
            return Err(DefenseError::InvalidLevel {
                building: Some(key),
                level: level.to_string(),
                reason: "above the building's maximum level",
            });
        }
        village.buildings.insert(key, level);
    }
    Ok(village)
}

fn checked_level(building: Option<&BuildingKey>, raw: f64) -> Result<u32, DefenseError> {
    let invalid = |reason| DefenseError::InvalidLevel {
        building: building.cloned(),
        level: raw.to_string(),
        reason,
    };
    if !raw.is_finite() {
        return Err(invalid("not a finite number"));
    }
    if raw < 0.0 {
        return Err(invalid("must not be negative"));
    }
    let value = Decimal::from_f64(raw).ok_or_else(|| invalid("too large"))?;
    if !value.fract().is_zero() {
        return Err(invalid("must be a whole number"));
    }
    value.to_u32().ok_or_else(|| invalid("too large"))
}

#[cfg(test)]
mod tests {
    use outpost_catalog::standard;

    use super::*;

    #[test]
    fn accepts_whole_levels() {
        assert_eq!(level_from_raw(0.0).ok(), Some(0));
        assert_eq!(level_from_raw(12.0).ok(), Some(12));
        assert_eq!(level_from_raw(-0.0).ok(), Some(0));
    }

    #[test]
    fn rejects_bad_levels() {
        for raw in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 2.5, 1e12] {
            assert!(
                matches!(level_from_raw(raw), Err(DefenseError::InvalidLevel { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn rejection_reason_names_the_problem() {
        let reason = |raw: f64| match level_from_raw(raw) {
            Err(DefenseError::InvalidLevel { reason, .. }) => Some(reason),
            _ => None,
        };
        assert_eq!(reason(f64::NAN), Some("not a finite number"));
        assert_eq!(reason(f64::INFINITY), Some("not a finite number"));
        assert_eq!(reason(1e30), Some("too large"));
        assert_eq!(reason(1e12), Some("too large"));
        assert_eq!(reason(-2.0), Some("must not be negative"));
        assert_eq!(reason(-1e30), Some("must not be negative"));
        assert_eq!(reason(0.5), Some("must be a whole number"));
    }

    #[test]
    fn builds_village_from_raw_pairs() {
        let village = village_from_raw(
            standard(),
            VillageId::new(),
            "Riverside",
            [("wall", 6.0), ("cranny", 3.0)],
        );
        let village = village.ok();
        assert_eq!(
            village.as_ref().map(|v| v.level(&BuildingKey::from("wall"))),
            Some(6)
        );
        assert_eq!(village.map(|v| v.buildings.len()), Some(2));
    }

    #[test]
    fn raw_village_rejects_unknown_key() {
        let result = village_from_raw(standard(), VillageId::new(), "X", [("keep", 1.0)]);
        assert!(matches!(result, Err(DefenseError::UnknownBuildingKey(k)) if k.as_str() == "keep"));
    }

    #[test]
    fn raw_village_rejects_level_above_max() {
        let result = village_from_raw(standard(), VillageId::new(), "X", [("moat", 11.0)]);
        assert!(matches!(
            result,
            Err(DefenseError::InvalidLevel { building: Some(_), .. })
        ));
    }

    #[test]
    fn raw_village_rejects_negative_level() {
        let result = village_from_raw(standard(), VillageId::new(), "X", [("wall", -3.0)]);
        let message = result.err().map(|e| e.to_string());
        assert_eq!(
            message.as_deref(),
            Some("invalid level -3 for wall: must not be negative")
        );
    }
}
