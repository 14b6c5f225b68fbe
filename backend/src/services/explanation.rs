//! Narrative delay explanation for an already recorded flight.

use super::formatting::to_fixed;
use crate::models::{Airport, Flight, Route};

/// Returned when none of the delay conditions apply.
pub const TYPICAL_CONDITIONS: &str =
    "This flight has typical conditions with no significant delay factors identified.";

/// The parts of a recorded flight the explainer reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSnapshot {
    pub reliability_score: f64,
    pub delay_minutes: Option<f64>,
}

impl From<&Flight> for FlightSnapshot {
    fn from(flight: &Flight) -> Self {
        Self {
            reliability_score: flight.reliability_score,
            delay_minutes: flight.delay_minutes,
        }
    }
}

/// Build the explanation from route, airport and score conditions.
///
/// Sentences are emitted in a fixed order: route weather, route congestion,
/// route historical delay, departure airport OTP, arrival airport delay, and
/// finally the flight's own reliability score.
pub fn explain_flight(
    flight: FlightSnapshot,
    route: Option<&Route>,
    departure: Option<&Airport>,
    arrival: Option<&Airport>,
) -> String {
    let mut sentences: Vec<String> = Vec::new();

    if let Some(route) = route {
        if route.weather_risk > 0.3 {
            sentences.push(format!(
                "Elevated weather risk ({}%) may impact flight times.",
                to_fixed(route.weather_risk * 100.0, 0)
            ));
        }
        if route.peak_hour_factor > 1.2 {
            sentences.push(format!(
                "Peak hour congestion expected (factor: {}x).",
                to_fixed(route.peak_hour_factor, 1)
            ));
        }
        if route.avg_delay_minutes > 15.0 {
            sentences.push(format!(
                "This route has a historical average delay of {} minutes.",
                to_fixed(route.avg_delay_minutes, 0)
            ));
        }
    }

    if let Some(departure) = departure.filter(|a| a.otp_percent < 75.0) {
        sentences.push(format!(
            "{} has below-average on-time performance ({}%).",
            departure.name,
            to_fixed(departure.otp_percent, 1)
        ));
    }

    if let Some(arrival) = arrival.filter(|a| a.avg_delay_minutes > 15.0) {
        sentences.push(format!(
            "Arrival airport typically experiences {} min average delays.",
            to_fixed(arrival.avg_delay_minutes, 0)
        ));
    }

    let score = flight.reliability_score;
    if score > 80.0 {
        sentences.push(format!(
            "High reliability score ({}) indicates good chance of on-time arrival.",
            to_fixed(score, 1)
        ));
    } else if score < 70.0 {
        sentences.push(format!(
            "Lower reliability score ({}) suggests potential delays.",
            to_fixed(score, 1)
        ));
    }

    if sentences.is_empty() {
        return TYPICAL_CONDITIONS.to_string();
    }
    sentences.join(" ")
}

#[cfg(test)]
#[path = "explanation_tests.rs"]
mod explanation_tests;
