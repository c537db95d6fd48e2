#![deny(warnings)]

//! Core domain models and invariants for the farm economics engine.
//!
//! This crate defines serializable types describing crops, planted
//! quantities, and environmental scenarios, with validation helpers to
//! guarantee basic invariants. All types are immutable value objects;
//! the calculators in `farm-econ` only ever read them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Per-factor adjustment table: level name (e.g. "low") to a signed
/// percentage yield adjustment (e.g. -50 halves the yield).
pub type FactorLevels = BTreeMap<String, Decimal>;

/// A named crop type with its base agronomics and economics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Crop {
    /// Human-readable crop name, e.g. "corn". Informational only.
    pub name: String,
    /// Base yield per plant under neutral conditions.
    pub base_yield: Decimal,
    /// Cost per plant. Absent when the crop is only evaluated for yield.
    #[serde(default)]
    pub costs: Option<Decimal>,
    /// Revenue per unit of yield. Absent when the crop is only evaluated
    /// for yield.
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    /// Environmental sensitivity: factor name (e.g. "wind") to level to
    /// percentage adjustment. Empty when the crop is insensitive.
    #[serde(default)]
    pub factors: BTreeMap<String, FactorLevels>,
}

/// A planted quantity of one crop type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CropEntry {
    /// The crop being planted.
    pub crop: Crop,
    /// Number of plants. Zero is valid and yields zero everywhere;
    /// negative counts are passed through arithmetically.
    pub num_crops: i64,
}

/// The full set of crop entries evaluated together in one calculation.
/// Entry order never affects results.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Portfolio {
    /// Planted crop entries.
    pub crops: Vec<CropEntry>,
}

/// The active level per environmental factor for one calculation, e.g.
/// `{wind: "low", sun: "high"}`. Transient input with no lifecycle of
/// its own; empty means no adjustment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentFactors(BTreeMap<String, String>);

impl EnvironmentFactors {
    /// A scenario with no active factors.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder-style insertion of an active factor level.
    pub fn with(mut self, factor: impl Into<String>, level: impl Into<String>) -> Self {
        self.0.insert(factor.into(), level.into());
        self
    }

    /// Iterate active (factor, level) pairs in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when no factors are active.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of active factors.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Crop names must be non-empty.
    #[error("crop name must not be empty")]
    EmptyName,
    /// A factor table must define at least one level.
    #[error("factor {0:?} defines no levels")]
    EmptyFactor(String),
}

/// Validate a crop definition.
///
/// Negative or zero `base_yield`, `costs`, and `sale_price` are left to
/// the caller's domain judgement; only structural invariants are checked.
pub fn validate_crop(crop: &Crop) -> Result<(), ValidationError> {
    if crop.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    for (factor, levels) in &crop.factors {
        if levels.is_empty() {
            return Err(ValidationError::EmptyFactor(factor.clone()));
        }
    }
    Ok(())
}

/// Validate every crop in a portfolio. Quantities are not constrained:
/// zero and negative counts are meaningful to the calculators.
pub fn validate_portfolio(portfolio: &Portfolio) -> Result<(), ValidationError> {
    for entry in &portfolio.crops {
        validate_crop(&entry.crop)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn corn() -> Crop {
        let mut wind = FactorLevels::new();
        wind.insert("low".to_string(), Decimal::ZERO);
        wind.insert("high".to_string(), Decimal::from(-40));
        let mut factors = BTreeMap::new();
        factors.insert("wind".to_string(), wind);
        Crop {
            name: "corn".to_string(),
            base_yield: Decimal::from(30),
            costs: Some(Decimal::ONE),
            sale_price: Some(Decimal::from(5)),
            factors,
        }
    }

    #[test]
    fn serde_roundtrip_crop() {
        let c = corn();
        let s = serde_json::to_string(&c).unwrap();
        let back: Crop = serde_json::from_str(&s).unwrap();
        assert_eq!(back.name, "corn");
        assert_eq!(back.base_yield, Decimal::from(30));
        assert_eq!(back.factors["wind"]["high"], Decimal::from(-40));
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let json = r#"{"name":"pumpkin","base_yield":"4"}"#;
        let c: Crop = serde_json::from_str(json).unwrap();
        assert_eq!(c.costs, None);
        assert_eq!(c.sale_price, None);
        assert!(c.factors.is_empty());
        validate_crop(&c).unwrap();
    }

    #[test]
    fn portfolio_roundtrip() {
        let p = Portfolio {
            crops: vec![
                CropEntry {
                    crop: corn(),
                    num_crops: 5,
                },
                CropEntry {
                    crop: corn(),
                    num_crops: 0,
                },
            ],
        };
        validate_portfolio(&p).unwrap();
        let s = serde_json::to_string_pretty(&p).unwrap();
        let back: Portfolio = serde_json::from_str(&s).unwrap();
        assert_eq!(back.crops.len(), 2);
        assert_eq!(back.crops[1].num_crops, 0);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut c = corn();
        c.name = "  ".to_string();
        assert_eq!(validate_crop(&c), Err(ValidationError::EmptyName));
    }

    #[test]
    fn factor_without_levels_is_rejected() {
        let mut c = corn();
        c.factors.insert("soil".to_string(), FactorLevels::new());
        assert_eq!(
            validate_crop(&c),
            Err(ValidationError::EmptyFactor("soil".to_string()))
        );
    }

    #[test]
    fn negative_quantity_is_not_a_validation_error() {
        let p = Portfolio {
            crops: vec![CropEntry {
                crop: corn(),
                num_crops: -3,
            }],
        };
        validate_portfolio(&p).unwrap();
    }

    #[test]
    fn environment_factors_builder_and_iteration() {
        let env = EnvironmentFactors::empty().with("sun", "low").with("wind", "high");
        assert_eq!(env.len(), 2);
        let pairs: Vec<_> = env.iter().collect();
        assert_eq!(pairs, vec![("sun", "low"), ("wind", "high")]);
        assert!(EnvironmentFactors::empty().is_empty());
    }

    proptest! {
        #[test]
        fn named_crops_validate(name in "[a-z]{1,12}", cents in -10_000i64..10_000) {
            let c = Crop {
                name,
                base_yield: Decimal::new(cents, 2),
                costs: None,
                sale_price: None,
                factors: BTreeMap::new(),
            };
            prop_assert!(validate_crop(&c).is_ok());
        }
    }
}
