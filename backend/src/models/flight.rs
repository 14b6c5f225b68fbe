//! Recorded flights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::network::RouteKey;

crate::define_string_id_type!(FlightId);

/// Operational status of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    Scheduled,
    Active,
    Landed,
    Delayed,
    Cancelled,
}

impl FlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Active => "active",
            Self::Landed => "landed",
            Self::Delayed => "delayed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FlightStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "active" => Ok(Self::Active),
            "landed" => Ok(Self::Landed),
            "delayed" => Ok(Self::Delayed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("Unknown flight status: {}", other)),
        }
    }
}

/// A single recorded flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(default = "FlightId::generate")]
    pub id: FlightId,
    #[serde(default)]
    pub icao24: String,
    pub callsign: String,
    pub airline_iata: String,
    pub departure_iata: String,
    pub arrival_iata: String,
    pub scheduled_departure: DateTime<Utc>,
    #[serde(default)]
    pub actual_departure: Option<DateTime<Utc>>,
    pub scheduled_arrival: DateTime<Utc>,
    #[serde(default)]
    pub actual_arrival: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delay_minutes: Option<f64>,
    pub status: FlightStatus,
    pub reliability_score: f64,
    #[serde(default)]
    pub turnaround_estimate: Option<u32>,
}

impl Flight {
    /// Origin/destination/airline triple this flight operates.
    pub fn route_key(&self) -> RouteKey {
        RouteKey::new(&self.departure_iata, &self.arrival_iata, &self.airline_iata)
    }

    /// Whether the flight touches the given airport on either end.
    pub fn touches_airport(&self, iata: &str) -> bool {
        self.departure_iata == iata || self.arrival_iata == iata
    }
}
