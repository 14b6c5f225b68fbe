//! Flight listing and detail views.

use std::collections::HashMap;

use log::debug;

use crate::db::{FlightFilter, FullRepository, Page, RepositoryResult};
use crate::models::{Airline, Airport, Flight, FlightId};
use crate::routes::flights::{FlightDetail, FlightHistoryEntry, FlightListItem};
use crate::routes::Paginated;
use crate::services::explanation::{explain_flight, FlightSnapshot};

/// Same-route flights shown alongside a flight detail.
pub const DETAIL_HISTORY_LIMIT: usize = 10;

/// Attach airline and airport display names, falling back to the IATA code
/// when the reference row is missing.
pub(crate) fn enrich_flight(
    flight: Flight,
    airlines: &HashMap<String, Airline>,
    airports: &HashMap<String, Airport>,
) -> FlightListItem {
    let airline_name = airlines
        .get(&flight.airline_iata)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| flight.airline_iata.clone());
    let (departure_name, departure_city) = airport_labels(airports, &flight.departure_iata);
    let (arrival_name, arrival_city) = airport_labels(airports, &flight.arrival_iata);

    FlightListItem {
        flight,
        airline_name,
        departure_city,
        departure_name,
        arrival_city,
        arrival_name,
    }
}

/// `(name, city)` of an airport, or the code twice.
pub(crate) fn airport_labels(airports: &HashMap<String, Airport>, iata: &str) -> (String, String) {
    match airports.get(iata) {
        Some(airport) => (airport.name.clone(), airport.city.clone()),
        None => (iata.to_string(), iata.to_string()),
    }
}

pub(crate) fn index_airports(airports: Vec<Airport>) -> HashMap<String, Airport> {
    airports.into_iter().map(|a| (a.iata.clone(), a)).collect()
}

fn index_airlines(airlines: Vec<Airline>) -> HashMap<String, Airline> {
    airlines.into_iter().map(|a| (a.iata.clone(), a)).collect()
}

/// One page of flights, newest scheduled departure first.
pub async fn list_flights<R: FullRepository + ?Sized>(
    repo: &R,
    filter: &FlightFilter,
    page: Page,
) -> RepositoryResult<Paginated<FlightListItem>> {
    let (flights, total, airlines, airports) = futures::try_join!(
        repo.list_flights(filter, page),
        repo.count_flights(filter),
        repo.list_airlines(),
        repo.list_airports(),
    )?;

    let airlines = index_airlines(airlines);
    let airports = index_airports(airports);
    let items = flights
        .into_iter()
        .map(|f| enrich_flight(f, &airlines, &airports))
        .collect();

    Ok(Paginated::new(items, page, total))
}

/// Full detail of one flight, or `None` when the id is unknown.
pub async fn get_flight_detail<R: FullRepository + ?Sized>(
    repo: &R,
    id: &FlightId,
) -> RepositoryResult<Option<FlightDetail>> {
    let Some(flight) = repo.get_flight(id).await? else {
        debug!("Flight {} not found", id.as_str());
        return Ok(None);
    };

    let key = flight.route_key();
    let (airline, departure, arrival, route, recent) = futures::try_join!(
        repo.get_airline(&flight.airline_iata),
        repo.get_airport(&flight.departure_iata),
        repo.get_airport(&flight.arrival_iata),
        repo.find_route(&key),
        repo.recent_flights_for_route(&key, DETAIL_HISTORY_LIMIT, Some(id)),
    )?;

    let explanation = explain_flight(
        FlightSnapshot::from(&flight),
        route.as_ref(),
        departure.as_ref(),
        arrival.as_ref(),
    );

    Ok(Some(FlightDetail {
        history: recent.iter().map(FlightHistoryEntry::from).collect(),
        flight,
        airline,
        departure,
        arrival,
        route,
        explanation,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use crate::models::FlightStatus;
    use crate::test_fixtures::*;

    #[tokio::test]
    async fn test_list_flights_enriches_names() {
        let repo = sample_repository();
        let page = list_flights(&repo, &FlightFilter::default(), Page::new(Some(2), None))
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 6);
        assert!(page.pagination.has_more);
        assert_eq!(page.data.len(), 2);

        let first = &page.data[0];
        assert_eq!(first.flight.id.as_str(), "f3");
        assert_eq!(first.airline_name, "Delta Air Lines");
        assert_eq!(first.departure_city, "Atlanta");
        assert_eq!(first.arrival_name, "John F. Kennedy");
    }

    #[tokio::test]
    async fn test_list_flights_falls_back_to_codes() {
        let repo = LocalRepository::new();
        repo.store_flight_impl(flight("x1", "ZZ", "AAA", "BBB", at(2026, 2, 1, 9, 0), FlightStatus::Scheduled, None));

        let page = list_flights(&repo, &FlightFilter::default(), Page::default())
            .await
            .unwrap();
        let item = &page.data[0];
        assert_eq!(item.airline_name, "ZZ");
        assert_eq!(item.departure_name, "AAA");
        assert_eq!(item.departure_city, "AAA");
        assert_eq!(item.arrival_city, "BBB");
        assert!(!page.pagination.has_more);
    }

    #[tokio::test]
    async fn test_flight_detail_assembles_history_and_explanation() {
        let repo = sample_repository();
        let detail = get_flight_detail(&repo, &FlightId::new("f3"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(detail.airline.as_ref().map(|a| a.iata.as_str()), Some("DL"));
        assert!(detail.route.is_some());
        let history: Vec<&str> = detail.history.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(history, vec!["f2", "f1"]);
        // JFK averages 18.5 min; fixture score 75 sits in the neutral band
        assert_eq!(
            detail.explanation,
            "Arrival airport typically experiences 19 min average delays."
        );
    }

    #[tokio::test]
    async fn test_flight_detail_unknown_id() {
        let repo = sample_repository();
        assert!(get_flight_detail(&repo, &FlightId::new("nope"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_flight_detail_propagates_repository_failure() {
        let repo = sample_repository();
        repo.set_healthy(false);
        assert!(get_flight_detail(&repo, &FlightId::new("f1")).await.is_err());
    }
}
