//! Repository-agnostic service operations.
//!
//! These functions work with any implementation of the repository traits and
//! hold the orchestration that must stay consistent regardless of the
//! storage backend.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers / dashboard services                     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Concurrent reference lookups for predictions         │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! │  - NetworkRepository / FlightRepository / Incident...   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!              ┌──────▼───────────┐
//!              │ Local Repository │
//!              │ (in-memory)      │
//!              └──────────────────┘
//! ```

use log::{debug, info};

use super::repository::{FullRepository, RepositoryResult};
use crate::models::{Airline, Airport, Route};
use crate::services::prediction::{
    predict_delay, PredictionInput, PredictionResult, ReferenceData, HISTORY_SAMPLE_CAP,
};

// ==================== Health & Connection ====================

/// Pass-through to the repository's health check.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Prediction ====================

/// Owned reference data resolved for one prediction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionReferences {
    pub airline: Option<Airline>,
    pub origin: Option<Airport>,
    pub destination: Option<Airport>,
    pub route: Option<Route>,
    /// Recorded delays of the most recent same-triple flights, newest first.
    pub history: Vec<Option<f64>>,
}

impl PredictionReferences {
    /// Borrow as the engine's input bundle.
    pub fn as_reference_data(&self) -> ReferenceData<'_> {
        ReferenceData {
            airline: self.airline.as_ref(),
            origin: self.origin.as_ref(),
            destination: self.destination.as_ref(),
            route: self.route.as_ref(),
            history: &self.history,
        }
    }
}

/// Resolve every reference the engine consults.
///
/// The five lookups (airline, origin, destination, route profile and up to
/// [`HISTORY_SAMPLE_CAP`] recent same-triple flights) are independent and
/// issued concurrently. The first failure aborts the whole fetch.
pub async fn fetch_prediction_references<R: FullRepository + ?Sized>(
    repo: &R,
    input: &PredictionInput,
) -> RepositoryResult<PredictionReferences> {
    let key = input.route_key();

    let (airline, origin, destination, route, recent) = futures::try_join!(
        repo.get_airline(&input.airline_iata),
        repo.get_airport(&input.origin_iata),
        repo.get_airport(&input.dest_iata),
        repo.find_route(&key),
        repo.recent_flights_for_route(&key, HISTORY_SAMPLE_CAP, None),
    )?;

    debug!(
        "References for {}: airline={}, origin={}, destination={}, route={}, history={}",
        key,
        airline.is_some(),
        origin.is_some(),
        destination.is_some(),
        route.is_some(),
        recent.len()
    );

    Ok(PredictionReferences {
        airline,
        origin,
        destination,
        route,
        history: recent.into_iter().map(|f| f.delay_minutes).collect(),
    })
}

/// Fetch references and score `input`.
pub async fn predict<R: FullRepository + ?Sized>(
    repo: &R,
    input: &PredictionInput,
) -> RepositoryResult<PredictionResult> {
    let references = fetch_prediction_references(repo, input).await?;
    let result = predict_delay(input, &references.as_reference_data());

    info!(
        "Predicted {}: score={}, delay={}min, confidence={}",
        input.route_key(),
        result.reliability_score,
        result.predicted_delay_minutes,
        result.confidence
    );
    Ok(result)
}
