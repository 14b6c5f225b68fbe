//! Network reference records: carriers, airports and the routes between them.

use serde::{Deserialize, Serialize};

crate::define_id_type!(i64, RouteId);

/// Operating carrier with its aggregate on-time performance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airline {
    pub iata: String,
    #[serde(default)]
    pub icao: String,
    pub name: String,
    #[serde(default)]
    pub country: String,
    /// On-time performance percentage (0-100)
    pub otp_percent: f64,
    #[serde(default)]
    pub avg_delay_minutes: f64,
    #[serde(default)]
    pub fleet_size: u32,
}

/// Airport with aggregate on-time rate and mean delay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    pub iata: String,
    #[serde(default)]
    pub icao: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// On-time performance percentage (0-100)
    pub otp_percent: f64,
    pub avg_delay_minutes: f64,
    #[serde(default)]
    pub total_flights: u32,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Static risk profile for an origin -> destination -> airline triple.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Surrogate key, assigned by the store.
    #[serde(default)]
    pub id: RouteId,
    pub origin_iata: String,
    pub dest_iata: String,
    pub airline_iata: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline_name: Option<String>,
    #[serde(default)]
    pub otp_percent: f64,
    pub avg_delay_minutes: f64,
    /// Weather-driven disruption likelihood (0-1)
    pub weather_risk: f64,
    #[serde(default = "default_peak_hour_factor")]
    pub peak_hour_factor: f64,
    #[serde(default)]
    pub reliability_index: f64,
}

fn default_peak_hour_factor() -> f64 {
    1.0
}

impl Default for RouteId {
    fn default() -> Self {
        RouteId(0)
    }
}

impl Route {
    pub fn key(&self) -> RouteKey {
        RouteKey::new(&self.origin_iata, &self.dest_iata, &self.airline_iata)
    }
}

/// Natural key of a route: the origin/destination/airline triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteKey {
    pub origin_iata: String,
    pub dest_iata: String,
    pub airline_iata: String,
}

impl RouteKey {
    pub fn new(origin: &str, dest: &str, airline: &str) -> Self {
        Self {
            origin_iata: origin.to_string(),
            dest_iata: dest.to_string(),
            airline_iata: airline.to_string(),
        }
    }
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{} ({})",
            self.origin_iata, self.dest_iata, self.airline_iata
        )
    }
}
