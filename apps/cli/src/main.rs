#![deny(warnings)]

//! Headless CLI for evaluating a crop portfolio under one environmental
//! scenario.

use anyhow::{Context, Result};
use farm_core::{
    validate_portfolio, Crop, CropEntry, EnvironmentFactors, FactorLevels, Portfolio,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// A portfolio plus the environmental scenario to evaluate it under.
#[derive(Debug, Deserialize)]
struct Scenario {
    portfolio: Portfolio,
    #[serde(default)]
    environment: EnvironmentFactors,
}

fn parse_args() -> Option<String> {
    let mut scenario: Option<String> = None;
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--scenario" => scenario = it.next(),
            _ => {}
        }
    }
    scenario
}

fn minimal_scenario() -> Scenario {
    let mut sun = FactorLevels::new();
    sun.insert("low".to_string(), Decimal::from(-50));
    sun.insert("high".to_string(), Decimal::from(50));
    let mut factors = BTreeMap::new();
    factors.insert("sun".to_string(), sun);

    let corn = Crop {
        name: "corn".to_string(),
        base_yield: Decimal::from(3),
        costs: Some(Decimal::ONE),
        sale_price: Some(Decimal::from(5)),
        factors,
    };
    let pumpkin = Crop {
        name: "pumpkin".to_string(),
        base_yield: Decimal::from(4),
        costs: Some(Decimal::TWO),
        sale_price: Some(Decimal::from(3)),
        factors: BTreeMap::new(),
    };

    Scenario {
        portfolio: Portfolio {
            crops: vec![
                CropEntry {
                    crop: corn,
                    num_crops: 5,
                },
                CropEntry {
                    crop: pumpkin,
                    num_crops: 2,
                },
            ],
        },
        environment: EnvironmentFactors::empty(),
    }
}

fn load_scenario(path: &str) -> Result<Scenario> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario file {path}"))?;
    serde_yaml::from_str(&raw).with_context(|| format!("parsing scenario file {path}"))
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let scenario_path = parse_args();
    info!(?scenario_path, "starting CLI");

    let scenario = match &scenario_path {
        Some(path) => load_scenario(path)?,
        None => minimal_scenario(),
    };
    validate_portfolio(&scenario.portfolio)?;

    let n_entries = scenario.portfolio.crops.len();
    let n_factors = scenario.environment.len();
    let yield_total = farm_econ::total_yield(&scenario.portfolio, &scenario.environment)?;
    let profit_total = farm_econ::total_profit(&scenario.portfolio, &scenario.environment)?;

    println!(
        "Portfolio OK | entries: {} | active factors: {}",
        n_entries, n_factors
    );
    println!(
        "Result | total yield: {} | total profit: ${}",
        yield_total, profit_total
    );

    Ok(())
}
