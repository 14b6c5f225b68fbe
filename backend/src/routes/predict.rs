use serde::{Deserialize, Serialize};

use super::validation::{parse_timestamp, require_iata, require_positive, ValidationError};
use crate::services::prediction::PredictionInput;

/// Raw prediction request body. Every field is optional on the wire so that
/// missing values surface as validation errors instead of decode failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub origin_iata: Option<String>,
    pub dest_iata: Option<String>,
    pub airline_iata: Option<String>,
    pub scheduled_departure: Option<String>,
    pub turnaround_minutes: Option<f64>,
}

impl PredictionRequest {
    pub fn validate(&self) -> Result<PredictionInput, ValidationError> {
        let origin = require_iata("originIata", self.origin_iata.as_deref())?;
        let dest = require_iata("destIata", self.dest_iata.as_deref())?;
        let airline = require_iata("airlineIata", self.airline_iata.as_deref())?;

        let mut input = PredictionInput::new(origin, dest, airline);
        if let Some(raw) = self.scheduled_departure.as_deref().filter(|s| !s.trim().is_empty()) {
            input = input.with_departure(parse_timestamp("scheduledDeparture", raw)?);
        }
        if let Some(minutes) = self.turnaround_minutes {
            input = input.with_turnaround(require_positive("turnaroundMinutes", minutes)?);
        }
        Ok(input)
    }
}

pub const PREDICT_DELAY: &str = "predict_delay";
