//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{
    AirlinesQuery, AirportsQuery, FlightsQuery, HealthResponse, ReportsQuery, RoutesQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{Airline, FlightId};
use crate::routes::flights::{FlightDetail, FlightListItem};
use crate::routes::network::{AirportListItem, RouteListItem};
use crate::routes::analytics::AnalyticsDashboard;
use crate::routes::predict::PredictionRequest;
use crate::routes::reports::ReportFormat;
use crate::routes::validation::now_utc;
use crate::routes::Paginated;
use crate::services::prediction::PredictionResult;
use crate::services::{analytics, flights, network, reports};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository
/// is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
        dataset_checksum: state.repository.dataset_checksum(),
    }))
}

// =============================================================================
// Prediction
// =============================================================================

/// POST /v1/predict-delay
///
/// Score a prospective flight from its route, airline and airports.
pub async fn predict_delay(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> HandlerResult<PredictionResult> {
    let Json(request) = payload?;
    let input = request.validate()?;

    let result = db_services::predict(state.repository.as_ref(), &input).await?;
    Ok(Json(result))
}

// =============================================================================
// Flights
// =============================================================================

/// GET /v1/flights
pub async fn list_flights(
    State(state): State<AppState>,
    query: Result<Query<FlightsQuery>, QueryRejection>,
) -> HandlerResult<Paginated<FlightListItem>> {
    let Query(query) = query?;
    let filter = query.filter()?;

    let page = flights::list_flights(state.repository.as_ref(), &filter, query.page()).await?;
    Ok(Json(page))
}

/// GET /v1/flights/{id}
///
/// Flight detail with reference rows, same-route history and a narrative
/// explanation.
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<FlightDetail> {
    let detail = flights::get_flight_detail(state.repository.as_ref(), &FlightId::new(id)).await?;
    detail
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))
}

// =============================================================================
// Network
// =============================================================================

/// GET /v1/airlines
pub async fn list_airlines(
    State(state): State<AppState>,
    query: Result<Query<AirlinesQuery>, QueryRejection>,
) -> HandlerResult<Paginated<Airline>> {
    let Query(query) = query?;
    let page = network::list_airlines(state.repository.as_ref(), query.page()).await?;
    Ok(Json(page))
}

/// GET /v1/airports
pub async fn list_airports(
    State(state): State<AppState>,
    query: Result<Query<AirportsQuery>, QueryRejection>,
) -> HandlerResult<Paginated<AirportListItem>> {
    let Query(query) = query?;
    let page = network::list_airports(
        state.repository.as_ref(),
        query.search.as_deref(),
        query.page(),
    )
    .await?;
    Ok(Json(page))
}

/// GET /v1/routes
pub async fn list_routes(
    State(state): State<AppState>,
    query: Result<Query<RoutesQuery>, QueryRejection>,
) -> HandlerResult<Paginated<RouteListItem>> {
    let Query(query) = query?;
    let filter = query.filter()?;

    let page = network::list_routes(state.repository.as_ref(), &filter, query.page()).await?;
    Ok(Json(page))
}

// =============================================================================
// Analytics & Reports
// =============================================================================

/// GET /v1/analytics
pub async fn get_analytics(State(state): State<AppState>) -> HandlerResult<AnalyticsDashboard> {
    let dashboard = analytics::get_analytics(state.repository.as_ref()).await?;
    Ok(Json(dashboard))
}

/// GET /v1/reports?type=&id=&format=
///
/// JSON by default; `format=csv` returns a one-row CSV attachment.
pub async fn get_report(
    State(state): State<AppState>,
    query: Result<Query<ReportsQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    let kind = query.kind()?;

    let report = reports::generate_report(
        state.repository.as_ref(),
        kind,
        query.id.as_deref(),
        now_utc(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("{} not found", entity_label(kind.as_str()))))?;

    match query.format() {
        ReportFormat::Json => Ok(Json(report).into_response()),
        ReportFormat::Csv => {
            let csv = report
                .to_csv()
                .map_err(|e| AppError::Internal(format!("Failed to render CSV: {}", e)))?;
            let disposition = format!("attachment; filename=\"{}\"", kind.csv_filename());
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response())
        }
    }
}

/// "flight" -> "Flight"
fn entity_label(kind: &str) -> String {
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
