//! Per-level bonus curves.
//!
//! A curve maps a building level to a bonus fraction. Level 0 (not built)
//! is always worth nothing. Curves are non-negative and non-decreasing in
//! level; [`BonusCurve::validate`] enforces that for loaded catalogs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal places kept for compound curves.
const COMPOUND_DP: u32 = 6;

/// How a building's bonus grows with its level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BonusCurve {
    /// `per_level * level`.
    Linear {
        /// Bonus added by each level.
        per_level: Decimal,
    },
    /// `(1 + rate)^level - 1`, rounded to six decimal places.
    Compound {
        /// Growth per level.
        rate: Decimal,
    },
    /// Explicit values; `values[n - 1]` is the bonus at level `n`.
    Table {
        /// One value per level, starting at level 1.
        values: Vec<Decimal>,
    },
}

impl BonusCurve {
    /// Bonus at `level`, or `None` if the arithmetic overflows.
    ///
    /// Table lookups past the last entry return the last entry.
    pub fn value_at(&self, level: u32) -> Option<Decimal> {
        if level == 0 {
            return Some(Decimal::ZERO);
        }
        match self {
            Self::Linear { per_level } => per_level.checked_mul(Decimal::from(level)),
            Self::Compound { rate } => {
                let factor = Decimal::ONE.checked_add(*rate)?;
                let mut acc = Decimal::ONE;
                for _ in 0..level {
                    acc = acc.checked_mul(factor)?;
                }
                Some(acc.checked_sub(Decimal::ONE)?.round_dp(COMPOUND_DP))
            }
            Self::Table { values } => {
                let idx = usize::try_from(level.saturating_sub(1)).ok()?;
                values.get(idx).or_else(|| values.last()).copied()
            }
        }
    }

    /// Check that the curve is non-negative and non-decreasing up to
    /// `max_level`.
    pub fn validate(&self, max_level: u32) -> Result<(), &'static str> {
        match self {
            Self::Linear { per_level } if per_level.is_sign_negative() => {
                Err("linear per_level must not be negative")
            }
            Self::Compound { rate } if rate.is_sign_negative() => {
                Err("compound rate must not be negative")
            }
            Self::Table { values } => {
                if usize::try_from(max_level).ok() != Some(values.len()) {
                    return Err("table must have exactly max_level values");
                }
                if values.iter().any(Decimal::is_sign_negative) {
                    return Err("table values must not be negative");
                }
                if values.windows(2).any(|pair| matches!(pair, [a, b] if b < a)) {
                    return Err("table values must be non-decreasing");
                }
                Ok(())
            }
            Self::Linear { .. } | Self::Compound { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn level_zero_is_worthless() {
        let curves = [
            BonusCurve::Linear { per_level: dec!(0.05) },
            BonusCurve::Compound { rate: dec!(0.03) },
            BonusCurve::Table { values: vec![dec!(0.1)] },
        ];
        for curve in &curves {
            assert_eq!(curve.value_at(0), Some(Decimal::ZERO));
        }
    }

    #[test]
    fn linear_scales_with_level() {
        let curve = BonusCurve::Linear { per_level: dec!(0.05) };
        assert_eq!(curve.value_at(4), Some(dec!(0.20)));
    }

    #[test]
    fn compound_grows_geometrically() {
        let curve = BonusCurve::Compound { rate: dec!(0.03) };
        assert_eq!(curve.value_at(1), Some(dec!(0.03)));
        assert_eq!(curve.value_at(2), Some(dec!(0.0609)));
        assert_eq!(curve.value_at(3), Some(dec!(0.092727)));
    }

    #[test]
    fn table_clamps_past_last_entry() {
        let curve = BonusCurve::Table {
            values: vec![dec!(0.01), dec!(0.03)],
        };
        assert_eq!(curve.value_at(2), Some(dec!(0.03)));
        assert_eq!(curve.value_at(7), Some(dec!(0.03)));
    }

    #[test]
    fn validate_rejects_decreasing_table() {
        let curve = BonusCurve::Table {
            values: vec![dec!(0.05), dec!(0.04)],
        };
        assert!(curve.validate(2).is_err());
    }

    #[test]
    fn validate_rejects_short_table() {
        let curve = BonusCurve::Table {
            values: vec![dec!(0.05)],
        };
        assert!(curve.validate(3).is_err());
    }

    #[test]
    fn validate_rejects_negative_rate() {
        assert!(BonusCurve::Linear { per_level: dec!(-0.01) }.validate(5).is_err());
        assert!(BonusCurve::Compound { rate: dec!(-0.01) }.validate(5).is_err());
        assert!(BonusCurve::Compound { rate: dec!(0.01) }.validate(5).is_ok());
    }

    #[test]
    fn deserializes_tagged_yaml() {
        let yaml = "kind: linear\nper_level: 0.05\n";
        let curve: Option<BonusCurve> = serde_yml::from_str(yaml).ok();
        assert_eq!(curve, Some(BonusCurve::Linear { per_level: dec!(0.05) }));
    }
}
