use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Airline, Airport, Flight, FlightId, FlightStatus, Route};

// =========================================================
// Flight listing + detail types
// =========================================================

/// A flight row enriched with display names for its airline and airports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightListItem {
    #[serde(flatten)]
    pub flight: Flight,
    pub airline_name: String,
    pub departure_city: String,
    pub departure_name: String,
    pub arrival_city: String,
    pub arrival_name: String,
}

/// Projection of a same-route flight shown in a detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightHistoryEntry {
    pub id: FlightId,
    pub callsign: String,
    pub scheduled_departure: DateTime<Utc>,
    pub actual_departure: Option<DateTime<Utc>>,
    pub delay_minutes: Option<f64>,
    pub status: FlightStatus,
    pub reliability_score: f64,
}

impl From<&Flight> for FlightHistoryEntry {
    fn from(flight: &Flight) -> Self {
        Self {
            id: flight.id.clone(),
            callsign: flight.callsign.clone(),
            scheduled_departure: flight.scheduled_departure,
            actual_departure: flight.actual_departure,
            delay_minutes: flight.delay_minutes,
            status: flight.status,
            reliability_score: flight.reliability_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetail {
    pub flight: Flight,
    pub airline: Option<Airline>,
    pub departure: Option<Airport>,
    pub arrival: Option<Airport>,
    pub route: Option<Route>,
    pub history: Vec<FlightHistoryEntry>,
    pub explanation: String,
}

pub const LIST_FLIGHTS: &str = "list_flights";
pub const GET_FLIGHT: &str = "get_flight";
