//! Record builders shared by unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::db::LocalRepository;
use crate::models::*;

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn airline(iata: &str, name: &str, otp: f64) -> Airline {
    Airline {
        iata: iata.to_string(),
        icao: format!("{}X", iata),
        name: name.to_string(),
        country: "United States".to_string(),
        otp_percent: otp,
        avg_delay_minutes: 100.0 - otp,
        fleet_size: 300,
    }
}

pub fn airport(iata: &str, name: &str, city: &str, otp: f64, avg_delay: f64, total: u32) -> Airport {
    Airport {
        iata: iata.to_string(),
        icao: format!("K{}", iata),
        name: name.to_string(),
        city: city.to_string(),
        country: "United States".to_string(),
        otp_percent: otp,
        avg_delay_minutes: avg_delay,
        total_flights: total,
        risk_score: 100.0 - otp,
        ..Default::default()
    }
}

pub fn route(origin: &str, dest: &str, airline: &str, reliability: f64, avg_delay: f64) -> Route {
    Route {
        origin_iata: origin.to_string(),
        dest_iata: dest.to_string(),
        airline_iata: airline.to_string(),
        otp_percent: reliability - 5.0,
        avg_delay_minutes: avg_delay,
        weather_risk: 0.2,
        peak_hour_factor: 1.0,
        reliability_index: reliability,
        ..Default::default()
    }
}

pub fn flight(
    id: &str,
    airline: &str,
    origin: &str,
    dest: &str,
    departure: DateTime<Utc>,
    status: FlightStatus,
    delay: Option<f64>,
) -> Flight {
    Flight {
        id: FlightId::new(id),
        icao24: format!("abc{}", id.len()),
        callsign: format!("{}{}", airline, id.to_uppercase()),
        airline_iata: airline.to_string(),
        departure_iata: origin.to_string(),
        arrival_iata: dest.to_string(),
        scheduled_departure: departure,
        actual_departure: delay.map(|d| departure + Duration::minutes(d as i64)),
        scheduled_arrival: departure + Duration::hours(3),
        actual_arrival: None,
        delay_minutes: delay,
        status,
        reliability_score: 75.0,
        turnaround_estimate: Some(45),
    }
}

pub fn incident(airport: &str, date: DateTime<Utc>, kind: IncidentType, resolved: bool) -> Incident {
    Incident {
        id: IncidentId::default(),
        airport_iata: airport.to_string(),
        date,
        kind,
        impact_level: 3,
        description: format!("{:?} disruption at {}", kind, airport),
        resolved,
    }
}

/// A small network: two carriers, three airports, three routes, six flights
/// and three incidents.
pub fn sample_repository() -> LocalRepository {
    let repo = LocalRepository::new();

    repo.store_airline_impl(airline("DL", "Delta Air Lines", 84.0));
    repo.store_airline_impl(airline("AA", "American Airlines", 68.5));

    repo.store_airport_impl(airport("ATL", "Hartsfield-Jackson", "Atlanta", 80.0, 12.0, 2500));
    repo.store_airport_impl(airport("JFK", "John F. Kennedy", "New York", 70.0, 18.5, 1800));
    repo.store_airport_impl(airport("LAX", "Los Angeles International", "Los Angeles", 76.0, 14.0, 2100));

    repo.store_route_impl(route("ATL", "JFK", "DL", 86.0, 11.0));
    repo.store_route_impl(route("JFK", "LAX", "AA", 64.0, 27.0));
    repo.store_route_impl(route("LAX", "ATL", "DL", 78.0, 16.0));

    repo.store_flight_impl(flight("f1", "DL", "ATL", "JFK", at(2026, 1, 5, 8, 0), FlightStatus::Landed, Some(5.0)));
    repo.store_flight_impl(flight("f2", "DL", "ATL", "JFK", at(2026, 1, 6, 8, 0), FlightStatus::Delayed, Some(40.0)));
    repo.store_flight_impl(flight("f3", "DL", "ATL", "JFK", at(2026, 1, 7, 18, 0), FlightStatus::Scheduled, None));
    repo.store_flight_impl(flight("f4", "AA", "JFK", "LAX", at(2026, 1, 6, 17, 30), FlightStatus::Active, Some(20.0)));
    repo.store_flight_impl(flight("f5", "AA", "JFK", "LAX", at(2026, 1, 4, 23, 0), FlightStatus::Landed, Some(75.0)));
    repo.store_flight_impl(flight("f6", "DL", "LAX", "ATL", at(2026, 1, 3, 8, 15), FlightStatus::Cancelled, None));

    repo.store_incident_impl(incident("JFK", at(2026, 1, 6, 6, 0), IncidentType::Weather, false));
    repo.store_incident_impl(incident("JFK", at(2026, 1, 2, 6, 0), IncidentType::Atc, true));
    repo.store_incident_impl(incident("ATL", at(2026, 1, 4, 12, 0), IncidentType::Security, false));

    repo
}
