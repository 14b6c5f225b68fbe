//! Dashboard aggregates over the whole network.

use std::collections::BTreeMap;

use chrono::Timelike;
use log::debug;

use crate::db::{
    FlightFilter, FullRepository, IncidentFilter, Page, RepositoryResult, RouteFilter,
    RouteSortKey, SortOrder,
};
use crate::models::{Airline, Airport, Flight, Incident, Route};
use crate::routes::analytics::{AnalyticsDashboard, DelayDistribution, PeakHourBucket};

pub const TOP_AIRPORTS: usize = 20;
pub const TOP_ROUTES: usize = 10;

/// Flight count keyed by status name.
pub fn flight_stats(flights: &[Flight]) -> BTreeMap<String, usize> {
    let mut stats = BTreeMap::new();
    for flight in flights {
        *stats.entry(flight.status.as_str().to_string()).or_insert(0) += 1;
    }
    stats
}

/// Band every flight with a recorded delay.
pub fn delay_distribution(flights: &[Flight]) -> DelayDistribution {
    let mut dist = DelayDistribution::default();
    for delay in flights.iter().filter_map(|f| f.delay_minutes) {
        dist.record(delay);
    }
    dist
}

/// Delay totals per UTC departure hour for flights with a recorded delay,
/// ordered by hour.
pub fn peak_hour_analysis(flights: &[Flight]) -> Vec<PeakHourBucket> {
    let mut by_hour: BTreeMap<u32, (usize, f64)> = BTreeMap::new();
    for flight in flights {
        let Some(delay) = flight.delay_minutes else {
            continue;
        };
        let entry = by_hour
            .entry(flight.scheduled_departure.hour())
            .or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += delay;
    }

    by_hour
        .into_iter()
        .map(|(hour, (count, total_delay))| PeakHourBucket {
            hour: format!("{:02}", hour),
            count,
            total_delay,
            avg_delay: if count > 0 {
                total_delay / count as f64
            } else {
                0.0
            },
        })
        .collect()
}

/// Assemble the dashboard from already ordered inputs.
///
/// `airports` is expected in OTP order, `routes` in any order; every flight is
/// considered for the status counts and only delayed ones for the
/// distribution and hourly buckets.
pub fn compute_analytics(
    airlines: Vec<Airline>,
    mut airports: Vec<Airport>,
    routes: &[Route],
    flights: &[Flight],
    active_incidents: Vec<Incident>,
) -> AnalyticsDashboard {
    airports.truncate(TOP_AIRPORTS);

    let ranked = |sort_by: RouteSortKey| -> Vec<Route> {
        let filter = RouteFilter {
            sort_by,
            order: SortOrder::Desc,
            ..Default::default()
        };
        let mut sorted = routes.to_vec();
        sorted.sort_by(|a, b| filter.compare(a, b));
        sorted.truncate(TOP_ROUTES);
        sorted
    };

    AnalyticsDashboard {
        airlines,
        airports,
        delayed_routes: ranked(RouteSortKey::AvgDelayMinutes),
        reliable_routes: ranked(RouteSortKey::ReliabilityIndex),
        flight_stats: flight_stats(flights),
        delay_distribution: delay_distribution(flights),
        peak_hour_analysis: peak_hour_analysis(flights),
        active_incidents,
    }
}

pub async fn get_analytics<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<AnalyticsDashboard> {
    let all_routes = RouteFilter::default();
    let all_flights = FlightFilter::default();
    let unresolved = IncidentFilter::unresolved();
    let (airlines, mut airports, routes, flights, incidents) = futures::try_join!(
        repo.list_airlines(),
        repo.list_airports(),
        repo.list_routes(&all_routes),
        repo.list_flights(&all_flights, Page::all()),
        repo.list_incidents(&unresolved),
    )?;

    airports.sort_by(|a, b| b.otp_percent.total_cmp(&a.otp_percent));
    debug!(
        "Analytics over {} flights, {} routes, {} open incidents",
        flights.len(),
        routes.len(),
        incidents.len()
    );

    Ok(compute_analytics(airlines, airports, &routes, &flights, incidents))
}
