#![deny(warnings)]

//! Yield and economics calculators for crop portfolios.
//!
//! This module provides validated utilities for:
//! - Environmentally adjusted per-plant and per-crop yield
//! - Cost, revenue, and profit per crop entry
//! - Portfolio-wide yield and profit totals
//!
//! Every function is a pure, synchronous transform of its arguments.
//! Percentage adjustments from simultaneous environmental factors
//! compound multiplicatively: each factor scales the yield already
//! adjusted by the others, so application order never matters.

use farm_core::{Crop, CropEntry, EnvironmentFactors, Portfolio};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

/// Errors produced by the yield and economics calculators.
///
/// Each variant names the crop (and field/key) the calculation was
/// missing, so a failure is attributable without re-running anything.
#[derive(Debug, Error, PartialEq)]
pub enum EconError {
    /// The scenario activates a factor the crop has no table for.
    #[error("crop {crop:?} has no adjustment table for factor {factor:?}")]
    UnknownFactor { crop: String, factor: String },
    /// The crop knows the factor but not the requested level.
    #[error("crop {crop:?} has no level {level:?} for factor {factor:?}")]
    UnknownLevel {
        crop: String,
        factor: String,
        level: String,
    },
    /// Cost and profit calculations need a per-plant cost.
    #[error("crop {0:?} has no per-plant cost")]
    MissingCosts(String),
    /// Revenue and profit calculations need a sale price.
    #[error("crop {0:?} has no sale price")]
    MissingSalePrice(String),
}

/// Yield of a single plant under the given environmental scenario.
///
/// Starts from the crop's base yield and multiplies in `1 + pct/100`
/// for every active factor. An empty scenario returns the base yield
/// unchanged. Fails when the scenario names a factor or level the crop
/// does not define; no factor is ever silently skipped.
///
/// Example:
/// a crop with base yield 30 and `sun: {low: -50}` yields 15 when the
/// scenario is `{sun: "low"}`.
pub fn plant_yield(crop: &Crop, env: &EnvironmentFactors) -> Result<Decimal, EconError> {
    let mut result = crop.base_yield;
    for (factor, level) in env.iter() {
        let levels = crop
            .factors
            .get(factor)
            .ok_or_else(|| EconError::UnknownFactor {
                crop: crop.name.clone(),
                factor: factor.to_string(),
            })?;
        let pct = levels.get(level).ok_or_else(|| EconError::UnknownLevel {
            crop: crop.name.clone(),
            factor: factor.to_string(),
            level: level.to_string(),
        })?;
        result *= Decimal::ONE + *pct / Decimal::ONE_HUNDRED;
    }
    Ok(result)
}

/// Yield of a whole crop entry: per-plant yield times plant count.
/// A zero count yields zero regardless of the scenario.
pub fn crop_yield(entry: &CropEntry, env: &EnvironmentFactors) -> Result<Decimal, EconError> {
    Ok(plant_yield(&entry.crop, env)? * Decimal::from(entry.num_crops))
}

/// Total yield across a portfolio, with the same scenario applied to
/// every entry. An empty portfolio totals zero; the first entry error
/// aborts the whole calculation.
pub fn total_yield(portfolio: &Portfolio, env: &EnvironmentFactors) -> Result<Decimal, EconError> {
    let mut total = Decimal::ZERO;
    for entry in &portfolio.crops {
        total += crop_yield(entry, env)?;
    }
    debug!(entries = portfolio.crops.len(), %total, "computed total yield");
    Ok(total)
}

/// Cost of a crop entry: plant count times per-plant cost. Costs do
/// not depend on the environment.
pub fn crop_cost(entry: &CropEntry) -> Result<Decimal, EconError> {
    let costs = entry
        .crop
        .costs
        .ok_or_else(|| EconError::MissingCosts(entry.crop.name.clone()))?;
    Ok(Decimal::from(entry.num_crops) * costs)
}

/// Revenue of a crop entry: adjusted crop yield times sale price.
/// Revenue scales with the actual (environmentally adjusted) yield,
/// not the nominal one.
pub fn crop_revenue(entry: &CropEntry, env: &EnvironmentFactors) -> Result<Decimal, EconError> {
    let sale_price = entry
        .crop
        .sale_price
        .ok_or_else(|| EconError::MissingSalePrice(entry.crop.name.clone()))?;
    Ok(crop_yield(entry, env)? * sale_price)
}

/// Profit of a crop entry: revenue minus cost. A negative result is a
/// loss, not an error.
pub fn crop_profit(entry: &CropEntry, env: &EnvironmentFactors) -> Result<Decimal, EconError> {
    Ok(crop_revenue(entry, env)? - crop_cost(entry)?)
}

/// Total profit across a portfolio under one scenario. An empty
/// portfolio totals zero.
pub fn total_profit(portfolio: &Portfolio, env: &EnvironmentFactors) -> Result<Decimal, EconError> {
    let mut total = Decimal::ZERO;
    for entry in &portfolio.crops {
        total += crop_profit(entry, env)?;
    }
    debug!(entries = portfolio.crops.len(), %total, "computed total profit");
    Ok(total)
}
