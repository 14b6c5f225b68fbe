//! JSON dataset files used to preload the in-memory repository.
//!
//! A dataset bundles every entity collection in the wire shape:
//!
//! ```json
//! { "airlines": [...], "airports": [...], "routes": [...],
//!   "flights": [...], "incidents": [...] }
//! ```
//!
//! Missing collections default to empty. Records are range-checked after
//! parsing so that a malformed file is rejected before anything is stored.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::checksum::calculate_checksum;
use crate::models::{Airline, Airport, Flight, Incident, Route};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub airlines: Vec<Airline>,
    pub airports: Vec<Airport>,
    pub routes: Vec<Route>,
    pub flights: Vec<Flight>,
    pub incidents: Vec<Incident>,
}

/// A parsed dataset along with the checksum of its source text.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub checksum: String,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.airlines.is_empty()
            && self.airports.is_empty()
            && self.routes.is_empty()
            && self.flights.is_empty()
            && self.incidents.is_empty()
    }

    /// Range-check every record.
    pub fn validate(&self) -> Result<()> {
        for (idx, airline) in self.airlines.iter().enumerate() {
            check_code("airline", idx, &airline.iata)?;
            check_percent("airline", idx, "otpPercent", airline.otp_percent)?;
            check_non_negative("airline", idx, "avgDelayMinutes", airline.avg_delay_minutes)?;
        }
        for (idx, airport) in self.airports.iter().enumerate() {
            check_code("airport", idx, &airport.iata)?;
            check_percent("airport", idx, "otpPercent", airport.otp_percent)?;
            check_non_negative("airport", idx, "avgDelayMinutes", airport.avg_delay_minutes)?;
        }
        for (idx, route) in self.routes.iter().enumerate() {
            check_code("route", idx, &route.origin_iata)?;
            check_code("route", idx, &route.dest_iata)?;
            check_code("route", idx, &route.airline_iata)?;
            check_non_negative("route", idx, "avgDelayMinutes", route.avg_delay_minutes)?;
            if !(0.0..=1.0).contains(&route.weather_risk) {
                anyhow::bail!(
                    "route #{}: weatherRisk must be within [0, 1], got {}",
                    idx,
                    route.weather_risk
                );
            }
        }
        for (idx, flight) in self.flights.iter().enumerate() {
            if flight.id.as_str().is_empty() {
                anyhow::bail!("flight #{}: id must not be empty", idx);
            }
            check_code("flight", idx, &flight.airline_iata)?;
            check_code("flight", idx, &flight.departure_iata)?;
            check_code("flight", idx, &flight.arrival_iata)?;
        }
        for (idx, incident) in self.incidents.iter().enumerate() {
            check_code("incident", idx, &incident.airport_iata)?;
            if !(1..=5).contains(&incident.impact_level) {
                anyhow::bail!(
                    "incident #{}: impactLevel must be within [1, 5], got {}",
                    idx,
                    incident.impact_level
                );
            }
        }
        Ok(())
    }
}

fn check_code(entity: &str, idx: usize, code: &str) -> Result<()> {
    if code.trim().is_empty() {
        anyhow::bail!("{} #{}: IATA code must not be empty", entity, idx);
    }
    Ok(())
}

fn check_percent(entity: &str, idx: usize, field: &str, value: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&value) {
        anyhow::bail!(
            "{} #{}: {} must be within [0, 100], got {}",
            entity,
            idx,
            field,
            value
        );
    }
    Ok(())
}

fn check_non_negative(entity: &str, idx: usize, field: &str, value: f64) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        anyhow::bail!("{} #{}: {} must be >= 0, got {}", entity, idx, field, value);
    }
    Ok(())
}

/// Parse and validate a dataset from a JSON string.
pub fn parse_dataset_json_str(json_str: &str) -> Result<LoadedDataset> {
    let dataset: Dataset =
        serde_json::from_str(json_str).context("Failed to parse dataset JSON")?;
    dataset.validate().context("Dataset failed validation")?;

    Ok(LoadedDataset {
        dataset,
        checksum: calculate_checksum(json_str),
    })
}

/// Read, parse and validate a dataset file.
pub fn parse_dataset_file(path: &Path) -> Result<LoadedDataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;
    let loaded = parse_dataset_json_str(&content)
        .with_context(|| format!("Invalid dataset file: {}", path.display()))?;

    log::info!(
        "Parsed dataset {} ({} airlines, {} airports, {} routes, {} flights, {} incidents)",
        path.display(),
        loaded.dataset.airlines.len(),
        loaded.dataset.airports.len(),
        loaded.dataset.routes.len(),
        loaded.dataset.flights.len(),
        loaded.dataset.incidents.len()
    );
    Ok(loaded)
}
