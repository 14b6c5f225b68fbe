//! Downloadable reports for a flight, an airport, a route or the whole
//! network.

use chrono::{DateTime, Utc};
use log::info;

use super::formatting::to_fixed;
use crate::db::{
    FlightFilter, FullRepository, IncidentFilter, RepositoryError, RepositoryResult, RouteFilter,
};
use crate::models::{FlightId, FlightStatus, RouteId};
use crate::routes::reports::{
    AirportReport, FlightReport, Report, ReportKind, RouteReport, SummaryOverview, SummaryReport,
};
use crate::routes::validation::{normalize_iata, ValidationError};

pub const REPORT_INCIDENT_LIMIT: usize = 10;
pub const REPORT_ROUTE_LIMIT: usize = 20;
pub const REPORT_FLIGHT_LIMIT: usize = 20;
pub const SUMMARY_TOP_LIMIT: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// `"x.y%"` of delayed flights, or `"0%"` for an empty network.
pub fn delay_rate(delayed: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{}%", to_fixed(delayed as f64 / total as f64 * 100.0, 1))
}

pub async fn flight_report<R: FullRepository + ?Sized>(
    repo: &R,
    id: &FlightId,
    generated_at: DateTime<Utc>,
) -> RepositoryResult<Option<FlightReport>> {
    let Some(flight) = repo.get_flight(id).await? else {
        return Ok(None);
    };

    let (airline, departure, arrival) = futures::try_join!(
        repo.get_airline(&flight.airline_iata),
        repo.get_airport(&flight.departure_iata),
        repo.get_airport(&flight.arrival_iata),
    )?;

    Ok(Some(FlightReport {
        title: format!("Flight Report: {}", flight.callsign),
        generated_at,
        flight,
        airline,
        departure,
        arrival,
    }))
}

pub async fn airport_report<R: FullRepository + ?Sized>(
    repo: &R,
    iata: &str,
    generated_at: DateTime<Utc>,
) -> RepositoryResult<Option<AirportReport>> {
    let Some(airport) = repo.get_airport(iata).await? else {
        return Ok(None);
    };

    let touching = RouteFilter {
        touches_airport: Some(iata.to_string()),
        ..Default::default()
    };
    let latest_incidents = IncidentFilter::default()
        .at_airport(iata)
        .with_limit(REPORT_INCIDENT_LIMIT);
    let touching_flights = FlightFilter::default().touching(iata);
    let (incidents, mut routes, flight_count) = futures::try_join!(
        repo.list_incidents(&latest_incidents),
        repo.list_routes(&touching),
        repo.count_flights(&touching_flights),
    )?;
    routes.truncate(REPORT_ROUTE_LIMIT);

    Ok(Some(AirportReport {
        title: format!("Airport Report: {}", airport.name),
        generated_at,
        airport,
        incidents,
        routes,
        recent_flight_count: flight_count,
    }))
}

pub async fn route_report<R: FullRepository + ?Sized>(
    repo: &R,
    id: RouteId,
    generated_at: DateTime<Utc>,
) -> RepositoryResult<Option<RouteReport>> {
    let Some(route) = repo.get_route(id).await? else {
        return Ok(None);
    };

    let key = route.key();
    let (origin, destination, recent_flights) = futures::try_join!(
        repo.get_airport(&route.origin_iata),
        repo.get_airport(&route.dest_iata),
        repo.recent_flights_for_route(&key, REPORT_FLIGHT_LIMIT, None),
    )?;

    Ok(Some(RouteReport {
        title: format!("Route Report: {} → {}", route.origin_iata, route.dest_iata),
        generated_at,
        route,
        origin,
        destination,
        recent_flights,
    }))
}

pub async fn summary_report<R: FullRepository + ?Sized>(
    repo: &R,
    generated_at: DateTime<Utc>,
) -> RepositoryResult<SummaryReport> {
    let all_flights = FlightFilter::default();
    let active_flights = FlightFilter::default().with_status(FlightStatus::Active);
    let delayed_flights = FlightFilter::default().with_status(FlightStatus::Delayed);
    let all_routes = RouteFilter::default();
    let latest_unresolved = IncidentFilter::unresolved().with_limit(SUMMARY_TOP_LIMIT);
    let (total, active, delayed, mut airports, airlines, mut routes, active_incidents) = futures::try_join!(
        repo.count_flights(&all_flights),
        repo.count_flights(&active_flights),
        repo.count_flights(&delayed_flights),
        repo.list_airports(),
        repo.list_airlines(),
        repo.list_routes(&all_routes),
        repo.list_incidents(&latest_unresolved),
    )?;

    airports.sort_by(|a, b| b.otp_percent.total_cmp(&a.otp_percent));
    airports.truncate(SUMMARY_TOP_LIMIT);
    routes.truncate(SUMMARY_TOP_LIMIT);

    Ok(SummaryReport {
        title: "Aviation Reliability Summary Report".to_string(),
        generated_at,
        overview: SummaryOverview {
            total_flights: total,
            active_flights: active,
            delayed_flights: delayed,
            delay_rate: delay_rate(delayed, total),
        },
        top_airports: airports,
        airlines,
        top_routes: routes,
        active_incidents,
    })
}

/// Build the requested report. `Ok(None)` means the referenced entity does
/// not exist.
pub async fn generate_report<R: FullRepository + ?Sized>(
    repo: &R,
    kind: ReportKind,
    id: Option<&str>,
    generated_at: DateTime<Utc>,
) -> Result<Option<Report>, ReportError> {
    let id = id.map(str::trim).filter(|s| !s.is_empty());
    if kind.requires_id() && id.is_none() {
        return Err(ValidationError::MissingField { field: "id" }.into());
    }
    let id = id.unwrap_or_default();

    let report = match kind {
        ReportKind::Flight => flight_report(repo, &FlightId::new(id), generated_at)
            .await?
            .map(Report::Flight),
        ReportKind::Airport => {
            let iata = normalize_iata(Some(id)).unwrap_or_default();
            airport_report(repo, &iata, generated_at)
                .await?
                .map(Report::Airport)
        }
        ReportKind::Route => {
            let route_id = id
                .parse::<i64>()
                .map_err(|_| ValidationError::UnsupportedValue {
                    field: "id",
                    value: id.to_string(),
                })?;
            route_report(repo, RouteId::new(route_id), generated_at)
                .await?
                .map(Report::Route)
        }
        ReportKind::Summary => Some(Report::Summary(summary_report(repo, generated_at).await?)),
    };

    if let Some(report) = &report {
        info!("Generated {} report: {}", kind.as_str(), report.title());
    }
    Ok(report)
}
