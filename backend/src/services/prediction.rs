//! Delay-reliability scoring engine.
//!
//! Combines carrier, airport, route and historical signals into a reliability
//! score, a predicted delay, a confidence value, a per-factor breakdown and a
//! narrative explanation.
//!
//! The engine is a pure function of its inputs: it performs no I/O, holds no
//! state and never fails. Missing reference data is absorbed by the defaulting
//! policy in [`resolve_signals`]; every numeric output is clamped to its
//! documented range.
//!
//! ```text
//! score = 0.5*airlineOtp + 0.3*airportOtp - 0.2*weatherRisk*100
//!       + 0.1*turnaroundFactor*100 - 0.05*(timeOfDayFactor - 1)*100
//!
//! delay = avgHistoricalDelay*0.5 + weatherRisk*20 + (timeOfDayFactor - 1)*15
//!       + (1 - turnaroundFactor)*10 + ((100 - airportOtp)/100)*10
//! ```

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

use super::formatting::{round_to, to_fixed};
use crate::models::{Airline, Airport, Route, RouteKey};

/// Airline OTP assumed when the carrier is unknown.
pub const DEFAULT_AIRLINE_OTP: f64 = 75.0;
/// Airport OTP assumed for an unknown origin or destination.
pub const DEFAULT_AIRPORT_OTP: f64 = 75.0;
/// Weather risk assumed when no route profile exists.
pub const DEFAULT_WEATHER_RISK: f64 = 0.2;
/// Historical delay assumed with neither history nor route profile.
pub const DEFAULT_HISTORICAL_DELAY: f64 = 15.0;
/// Maximum number of historical flights consulted per prediction.
pub const HISTORY_SAMPLE_CAP: usize = 50;

const BASE_CONFIDENCE: f64 = 0.6;
const MAX_CONFIDENCE: f64 = 0.95;

const PEAK_FACTOR: f64 = 1.3;
const NIGHT_FACTOR: f64 = 0.8;

// ============================================================================
// Inputs
// ============================================================================

/// A hypothetical flight to score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    pub origin_iata: String,
    pub dest_iata: String,
    pub airline_iata: String,
    /// Scheduled departure; the hour is read in the offset it carries.
    #[serde(default)]
    pub scheduled_departure: Option<DateTime<FixedOffset>>,
    /// Ground time before departure, in minutes.
    #[serde(default)]
    pub turnaround_minutes: Option<f64>,
}

impl PredictionInput {
    pub fn new(
        origin_iata: impl Into<String>,
        dest_iata: impl Into<String>,
        airline_iata: impl Into<String>,
    ) -> Self {
        Self {
            origin_iata: origin_iata.into(),
            dest_iata: dest_iata.into(),
            airline_iata: airline_iata.into(),
            scheduled_departure: None,
            turnaround_minutes: None,
        }
    }

    pub fn with_departure(mut self, departure: DateTime<FixedOffset>) -> Self {
        self.scheduled_departure = Some(departure);
        self
    }

    pub fn with_turnaround(mut self, minutes: f64) -> Self {
        self.turnaround_minutes = Some(minutes);
        self
    }

    pub fn route_key(&self) -> RouteKey {
        RouteKey::new(&self.origin_iata, &self.dest_iata, &self.airline_iata)
    }
}

/// Reference data resolved by the caller before invoking the engine.
///
/// Every reference may be absent. `history` holds the recorded delays of the
/// most recent flights on the same origin/destination/airline triple
/// (most-recent first); `None` entries count as zero delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceData<'a> {
    pub airline: Option<&'a Airline>,
    pub origin: Option<&'a Airport>,
    pub destination: Option<&'a Airport>,
    pub route: Option<&'a Route>,
    pub history: &'a [Option<f64>],
}

// ============================================================================
// Outputs
// ============================================================================

/// Direction in which a factor pushes the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

impl Impact {
    /// Positive wins when both conditions hold.
    fn classify(positive: bool, negative: bool) -> Self {
        if positive {
            Impact::Positive
        } else if negative {
            Impact::Negative
        } else {
            Impact::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorExplanation {
    pub name: String,
    pub value: f64,
    pub impact: Impact,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// 0-100, one decimal
    pub reliability_score: f64,
    pub predicted_delay_minutes: u32,
    /// 0.6-0.95, two decimals
    pub confidence: f64,
    pub factors: Vec<FactorExplanation>,
    pub explanation: String,
}

// ============================================================================
// Signal resolution
// ============================================================================

/// Intermediate factors after the defaulting policy has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signals {
    pub airline_otp: f64,
    pub origin_otp: f64,
    pub destination_otp: f64,
    /// Mean of origin and destination OTP.
    pub airport_otp: f64,
    pub weather_risk: f64,
    pub time_of_day_factor: f64,
    pub turnaround_factor: f64,
    pub avg_historical_delay: f64,
}

/// Apply the defaulting policy and derive every intermediate factor.
pub fn resolve_signals(input: &PredictionInput, refs: &ReferenceData<'_>) -> Signals {
    let airline_otp = refs
        .airline
        .map(|a| a.otp_percent)
        .unwrap_or(DEFAULT_AIRLINE_OTP);
    let origin_otp = refs
        .origin
        .map(|a| a.otp_percent)
        .unwrap_or(DEFAULT_AIRPORT_OTP);
    let destination_otp = refs
        .destination
        .map(|a| a.otp_percent)
        .unwrap_or(DEFAULT_AIRPORT_OTP);
    let weather_risk = refs
        .route
        .map(|r| r.weather_risk)
        .unwrap_or(DEFAULT_WEATHER_RISK);

    Signals {
        airline_otp,
        origin_otp,
        destination_otp,
        airport_otp: (origin_otp + destination_otp) / 2.0,
        weather_risk,
        time_of_day_factor: time_of_day_factor(input.scheduled_departure.as_ref()),
        turnaround_factor: turnaround_factor(input.turnaround_minutes),
        avg_historical_delay: average_historical_delay(refs.history, refs.route),
    }
}

/// Peak-hour multiplier from the departure's wall-clock hour.
///
/// 07-09 and 17-20 (inclusive) are peak; 22-05 is night; anything else, or no
/// departure at all, is neutral.
pub fn time_of_day_factor(departure: Option<&DateTime<FixedOffset>>) -> f64 {
    let Some(departure) = departure else {
        return 1.0;
    };
    match departure.hour() {
        7..=9 | 17..=20 => PEAK_FACTOR,
        h if h >= 22 || h <= 5 => NIGHT_FACTOR,
        _ => 1.0,
    }
}

/// Turnaround efficiency: short ground times raise risk, long ones lower it.
pub fn turnaround_factor(minutes: Option<f64>) -> f64 {
    match minutes {
        Some(m) if m < 30.0 => 0.7,
        Some(m) if m < 45.0 => 0.85,
        Some(m) if m > 90.0 => 1.1,
        _ => 1.0,
    }
}

/// Mean recorded delay of the sample, falling back to the route profile and
/// then to [`DEFAULT_HISTORICAL_DELAY`].
pub fn average_historical_delay(history: &[Option<f64>], route: Option<&Route>) -> f64 {
    if !history.is_empty() {
        let total: f64 = history.iter().map(|d| d.unwrap_or(0.0)).sum();
        return total / history.len() as f64;
    }
    route
        .map(|r| r.avg_delay_minutes)
        .unwrap_or(DEFAULT_HISTORICAL_DELAY)
}

// ============================================================================
// Scoring
// ============================================================================

/// Composite reliability, clamped to [0, 100] but not yet rounded.
pub fn reliability_score(signals: &Signals) -> f64 {
    let score = 0.5 * signals.airline_otp + 0.3 * signals.airport_otp
        - 0.2 * signals.weather_risk * 100.0
        + 0.1 * signals.turnaround_factor * 100.0
        - 0.05 * (signals.time_of_day_factor - 1.0) * 100.0;
    score.clamp(0.0, 100.0)
}

/// Predicted delay in whole minutes, never negative.
pub fn predicted_delay_minutes(signals: &Signals) -> u32 {
    let weather_impact = signals.weather_risk * 20.0;
    let peak_hour_impact = (signals.time_of_day_factor - 1.0) * 15.0;
    let turnaround_impact = (1.0 - signals.turnaround_factor) * 10.0;
    let otp_impact = ((100.0 - signals.airport_otp) / 100.0) * 10.0;

    let delay = signals.avg_historical_delay * 0.5
        + weather_impact
        + peak_hour_impact
        + turnaround_impact
        + otp_impact;

    // Saturating cast: NaN and negatives land on 0.
    delay.round().max(0.0) as u32
}

/// Confidence grows with the amount of reference data available.
pub fn confidence(refs: &ReferenceData<'_>) -> f64 {
    let mut confidence = BASE_CONFIDENCE;
    if refs.route.is_some() {
        confidence += 0.1;
    }
    if refs.history.len() >= 10 {
        confidence += 0.15;
    } else if refs.history.len() >= 5 {
        confidence += 0.1;
    }
    if refs.airline.is_some() {
        confidence += 0.05;
    }
    if refs.origin.is_some() && refs.destination.is_some() {
        confidence += 0.1;
    }
    round_to(confidence.clamp(BASE_CONFIDENCE, MAX_CONFIDENCE), 2)
}

fn build_factors(
    input: &PredictionInput,
    refs: &ReferenceData<'_>,
    signals: &Signals,
) -> Vec<FactorExplanation> {
    let airline_label = refs
        .airline
        .map(|a| a.name.as_str())
        .unwrap_or(input.airline_iata.as_str());

    let mut factors = vec![
        FactorExplanation {
            name: "Airline OTP".to_string(),
            value: signals.airline_otp,
            impact: Impact::classify(signals.airline_otp >= 80.0, signals.airline_otp < 70.0),
            description: format!(
                "{} has {}% on-time performance",
                airline_label,
                to_fixed(signals.airline_otp, 1)
            ),
        },
        FactorExplanation {
            name: "Airport OTP".to_string(),
            value: signals.airport_otp,
            impact: Impact::classify(signals.airport_otp >= 75.0, signals.airport_otp < 70.0),
            description: format!(
                "Combined airport on-time rate: {}%",
                to_fixed(signals.airport_otp, 1)
            ),
        },
        FactorExplanation {
            name: "Weather Risk".to_string(),
            value: signals.weather_risk * 100.0,
            impact: Impact::classify(signals.weather_risk < 0.2, signals.weather_risk > 0.35),
            description: format!(
                "Weather risk factor: {}%",
                to_fixed(signals.weather_risk * 100.0, 0)
            ),
        },
        FactorExplanation {
            name: "Time of Day".to_string(),
            value: signals.time_of_day_factor * 100.0 - 100.0,
            impact: Impact::classify(
                signals.time_of_day_factor <= 1.0,
                signals.time_of_day_factor > 1.2,
            ),
            description: if signals.time_of_day_factor > 1.0 {
                "Peak hour departure increases delay risk".to_string()
            } else {
                "Off-peak departure time".to_string()
            },
        },
    ];

    if let Some(minutes) = input.turnaround_minutes {
        factors.push(FactorExplanation {
            name: "Turnaround".to_string(),
            value: minutes,
            impact: Impact::classify(
                signals.turnaround_factor >= 1.0,
                signals.turnaround_factor < 0.8,
            ),
            description: format!("{} min turnaround time", minutes),
        });
    }

    factors
}

/// Narrative summary of a prediction.
///
/// Always opens with a reliability clause and a delay clause, followed by the
/// negative ("Risk factors") and positive ("Favorable factors") factor names.
pub fn explain_prediction(
    reliability_score: f64,
    predicted_delay_minutes: u32,
    factors: &[FactorExplanation],
) -> String {
    let score = to_fixed(reliability_score, 1);
    let mut clauses = Vec::with_capacity(4);

    clauses.push(if reliability_score >= 80.0 {
        format!("High reliability expected ({} score).", score)
    } else if reliability_score >= 70.0 {
        format!("Moderate reliability expected ({} score).", score)
    } else {
        format!("Lower reliability predicted ({} score).", score)
    });

    clauses.push(if predicted_delay_minutes <= 10 {
        "On-time arrival is likely.".to_string()
    } else if predicted_delay_minutes <= 30 {
        format!(
            "Minor delay of ~{} minutes expected.",
            predicted_delay_minutes
        )
    } else {
        format!(
            "Significant delay of ~{} minutes predicted.",
            predicted_delay_minutes
        )
    });

    let names_with = |impact: Impact| -> Vec<String> {
        factors
            .iter()
            .filter(|f| f.impact == impact)
            .map(|f| f.name.to_lowercase())
            .collect()
    };

    let negative = names_with(Impact::Negative);
    if !negative.is_empty() {
        clauses.push(format!("Risk factors: {}.", negative.join(", ")));
    }
    let positive = names_with(Impact::Positive);
    if !positive.is_empty() {
        clauses.push(format!("Favorable factors: {}.", positive.join(", ")));
    }

    clauses.join(" ").trim_end().to_string()
}

/// Score a hypothetical flight against the supplied reference data.
pub fn predict_delay(input: &PredictionInput, refs: &ReferenceData<'_>) -> PredictionResult {
    let signals = resolve_signals(input, refs);
    let score = reliability_score(&signals);
    let delay = predicted_delay_minutes(&signals);
    let factors = build_factors(input, refs, &signals);
    let explanation = explain_prediction(score, delay, &factors);

    PredictionResult {
        reliability_score: round_to(score, 1),
        predicted_delay_minutes: delay,
        confidence: confidence(refs),
        factors,
        explanation,
    }
}

#[cfg(test)]
#[path = "prediction_tests.rs"]
mod prediction_tests;
