//! Airline, airport and route listings.

use std::collections::HashMap;

use crate::db::{FullRepository, IncidentFilter, Page, RepositoryResult, RouteFilter};
use crate::models::{Airline, Airport, Incident};
use crate::routes::network::{AirportListItem, RouteListItem};
use crate::routes::Paginated;
use crate::services::flights::{airport_labels, index_airports};

/// Case-insensitive substring match over code, name, city and country.
pub fn airport_matches_search(airport: &Airport, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    [&airport.iata, &airport.name, &airport.city, &airport.country]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub(crate) fn count_by_airport(incidents: &[Incident]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for incident in incidents {
        *counts.entry(incident.airport_iata.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Airlines by on-time performance, best first.
pub async fn list_airlines<R: FullRepository + ?Sized>(
    repo: &R,
    page: Page,
) -> RepositoryResult<Paginated<Airline>> {
    let airlines = repo.list_airlines().await?;
    Ok(Paginated::from_ordered(airlines, page))
}

/// Airports by traffic, busiest first, each with its open incident count.
pub async fn list_airports<R: FullRepository + ?Sized>(
    repo: &R,
    search: Option<&str>,
    page: Page,
) -> RepositoryResult<Paginated<AirportListItem>> {
    let unresolved = IncidentFilter::unresolved();
    let (airports, open_incidents) =
        futures::try_join!(repo.list_airports(), repo.list_incidents(&unresolved))?;

    let search = search.map(str::trim).filter(|s| !s.is_empty());
    let matching: Vec<Airport> = airports
        .into_iter()
        .filter(|a| search.is_none_or(|needle| airport_matches_search(a, needle)))
        .collect();

    let counts = count_by_airport(&open_incidents);
    let paged = Paginated::from_ordered(matching, page);
    let data = paged
        .data
        .into_iter()
        .map(|airport| AirportListItem {
            active_incidents: counts.get(airport.iata.as_str()).copied().unwrap_or(0),
            airport,
        })
        .collect();

    Ok(Paginated {
        data,
        pagination: paged.pagination,
    })
}

/// Filtered, sorted routes with the display names of both ends.
pub async fn list_routes<R: FullRepository + ?Sized>(
    repo: &R,
    filter: &RouteFilter,
    page: Page,
) -> RepositoryResult<Paginated<RouteListItem>> {
    let (routes, airports) = futures::try_join!(repo.list_routes(filter), repo.list_airports())?;

    let airports = index_airports(airports);
    let paged = Paginated::from_ordered(routes, page);
    let data = paged
        .data
        .into_iter()
        .map(|route| {
            let (origin_name, origin_city) = airport_labels(&airports, &route.origin_iata);
            let (dest_name, dest_city) = airport_labels(&airports, &route.dest_iata);
            RouteListItem {
                route,
                origin_name,
                origin_city,
                dest_name,
                dest_city,
            }
        })
        .collect();

    Ok(Paginated {
        data,
        pagination: paged.pagination,
    })
}
