use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Airline, Airport, Incident, Route};

// =========================================================
// Analytics dashboard types + route
// =========================================================

/// Counts of delayed flights per severity band, in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayDistribution {
    /// Up to 15 minutes.
    pub on_time: usize,
    /// Over 15, up to 30.
    pub minor: usize,
    /// Over 30, up to 60.
    pub moderate: usize,
    /// Over 60.
    pub severe: usize,
}

impl DelayDistribution {
    pub fn record(&mut self, delay_minutes: f64) {
        if delay_minutes <= 15.0 {
            self.on_time += 1;
        } else if delay_minutes <= 30.0 {
            self.minor += 1;
        } else if delay_minutes <= 60.0 {
            self.moderate += 1;
        } else {
            self.severe += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.on_time + self.minor + self.moderate + self.severe
    }
}

/// Delay totals for one UTC departure hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakHourBucket {
    /// Zero-padded hour, "00" to "23".
    pub hour: String,
    pub count: usize,
    pub total_delay: f64,
    pub avg_delay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDashboard {
    pub airlines: Vec<Airline>,
    pub airports: Vec<Airport>,
    pub delayed_routes: Vec<Route>,
    pub reliable_routes: Vec<Route>,
    /// Flight count keyed by status name.
    pub flight_stats: BTreeMap<String, usize>,
    pub delay_distribution: DelayDistribution,
    pub peak_hour_analysis: Vec<PeakHourBucket>,
    pub active_incidents: Vec<Incident>,
}

pub const GET_ANALYTICS: &str = "get_analytics";
