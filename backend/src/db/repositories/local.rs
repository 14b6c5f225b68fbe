//! In-memory local repository implementation.
//!
//! Stores every entity in hash maps behind a shared lock. Suitable for local
//! development, tests and serving a preloaded dataset file.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::dataset::{Dataset, LoadedDataset};
use crate::db::models::{FlightFilter, IncidentFilter, Page, RouteFilter};
use crate::db::repository::*;
use crate::models::{
    Airline, Airport, Flight, FlightId, Incident, IncidentId, Route, RouteId, RouteKey,
};

/// In-memory local repository.
///
/// Cloning is cheap and every clone shares the same data.
///
/// # Example
/// ```ignore
/// use reliability_tracker::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// repo.store_airline_impl(airline);
/// let found = repo.get_airline("DL").await?;
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    airlines: HashMap<String, Airline>,
    airports: HashMap<String, Airport>,
    routes: HashMap<RouteId, Route>,
    route_index: HashMap<RouteKey, RouteId>,
    flights: HashMap<FlightId, Flight>,
    incidents: HashMap<IncidentId, Incident>,

    // ID counters
    next_route_id: i64,
    next_incident_id: i64,

    /// SHA-256 of the dataset file this store was loaded from
    dataset_checksum: Option<String>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            airlines: HashMap::new(),
            airports: HashMap::new(),
            routes: HashMap::new(),
            route_index: HashMap::new(),
            flights: HashMap::new(),
            incidents: HashMap::new(),
            next_route_id: 1,
            next_incident_id: 1,
            dataset_checksum: None,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository populated with every record of `dataset`.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let repo = Self::new();
        repo.load_dataset(dataset);
        repo
    }

    /// Create a repository from a parsed dataset file, recording its checksum.
    pub fn from_loaded(loaded: LoadedDataset) -> Self {
        let repo = Self::from_dataset(loaded.dataset);
        repo.data.write().dataset_checksum = Some(loaded.checksum);
        repo
    }

    /// Store every record of `dataset`. Route and incident ids are reassigned.
    pub fn load_dataset(&self, dataset: Dataset) {
        let Dataset {
            airlines,
            airports,
            routes,
            flights,
            incidents,
        } = dataset;

        for airline in airlines {
            self.store_airline_impl(airline);
        }
        for airport in airports {
            self.store_airport_impl(airport);
        }
        for route in routes {
            self.store_route_impl(route);
        }
        for flight in flights {
            self.store_flight_impl(flight);
        }
        for incident in incidents {
            self.store_incident_impl(incident);
        }

        let data = self.data.read();
        log::info!(
            "Local repository loaded: {} airlines, {} airports, {} routes, {} flights, {} incidents",
            data.airlines.len(),
            data.airports.len(),
            data.routes.len(),
            data.flights.len(),
            data.incidents.len()
        );
    }

    pub fn store_airline_impl(&self, airline: Airline) {
        let mut data = self.data.write();
        data.airlines.insert(airline.iata.clone(), airline);
    }

    pub fn store_airport_impl(&self, airport: Airport) {
        let mut data = self.data.write();
        data.airports.insert(airport.iata.clone(), airport);
    }

    /// Add a route, assigning it a fresh id.
    ///
    /// A route with the same origin/destination/airline triple as an existing
    /// one replaces it under the new id.
    pub fn store_route_impl(&self, mut route: Route) -> RouteId {
        let mut data = self.data.write();
        let route_id = RouteId::new(data.next_route_id);
        data.next_route_id += 1;
        route.id = route_id;

        if let Some(previous) = data.route_index.insert(route.key(), route_id) {
            data.routes.remove(&previous);
        }
        data.routes.insert(route_id, route);
        route_id
    }

    pub fn store_flight_impl(&self, flight: Flight) -> FlightId {
        let mut data = self.data.write();
        let flight_id = flight.id.clone();
        data.flights.insert(flight_id.clone(), flight);
        flight_id
    }

    /// Add an incident, assigning it a fresh id.
    pub fn store_incident_impl(&self, mut incident: Incident) -> IncidentId {
        let mut data = self.data.write();
        let incident_id = IncidentId::new(data.next_incident_id);
        data.next_incident_id += 1;
        incident.id = incident_id;
        data.incidents.insert(incident_id, incident);
        incident_id
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    pub fn flight_count(&self) -> usize {
        self.data.read().flights.len()
    }

    pub fn route_count(&self) -> usize {
        self.data.read().routes.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Local repository is not healthy",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }

    /// Flights matching `filter`, newest scheduled departure first.
    fn filtered_flights(&self, filter: &FlightFilter) -> Vec<Flight> {
        let data = self.data.read();
        let mut flights: Vec<Flight> = data
            .flights
            .values()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect();
        sort_newest_first(&mut flights);
        flights
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Scheduled departure descending; ties broken by id for a stable order.
fn sort_newest_first(flights: &mut [Flight]) {
    flights.sort_by(|a, b| {
        b.scheduled_departure
            .cmp(&a.scheduled_departure)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[async_trait]
impl NetworkRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    fn dataset_checksum(&self) -> Option<String> {
        self.data.read().dataset_checksum.clone()
    }

    async fn get_airline(&self, iata: &str) -> RepositoryResult<Option<Airline>> {
        self.check_health("get_airline")?;
        log::debug!("Looking up airline {}", iata);
        Ok(self.data.read().airlines.get(iata).cloned())
    }

    async fn list_airlines(&self) -> RepositoryResult<Vec<Airline>> {
        self.check_health("list_airlines")?;
        let mut airlines: Vec<Airline> = self.data.read().airlines.values().cloned().collect();
        airlines.sort_by(|a, b| {
            b.otp_percent
                .total_cmp(&a.otp_percent)
                .then_with(|| a.iata.cmp(&b.iata))
        });
        Ok(airlines)
    }

    async fn store_airline(&self, airline: Airline) -> RepositoryResult<()> {
        self.check_health("store_airline")?;
        self.store_airline_impl(airline);
        Ok(())
    }

    async fn get_airport(&self, iata: &str) -> RepositoryResult<Option<Airport>> {
        self.check_health("get_airport")?;
        log::debug!("Looking up airport {}", iata);
        Ok(self.data.read().airports.get(iata).cloned())
    }

    async fn list_airports(&self) -> RepositoryResult<Vec<Airport>> {
        self.check_health("list_airports")?;
        let mut airports: Vec<Airport> = self.data.read().airports.values().cloned().collect();
        airports.sort_by(|a, b| {
            b.total_flights
                .cmp(&a.total_flights)
                .then_with(|| a.iata.cmp(&b.iata))
        });
        Ok(airports)
    }

    async fn store_airport(&self, airport: Airport) -> RepositoryResult<()> {
        self.check_health("store_airport")?;
        self.store_airport_impl(airport);
        Ok(())
    }

    async fn find_route(&self, key: &RouteKey) -> RepositoryResult<Option<Route>> {
        self.check_health("find_route")?;
        log::debug!("Looking up route {}", key);
        let data = self.data.read();
        Ok(data
            .route_index
            .get(key)
            .and_then(|id| data.routes.get(id))
            .cloned())
    }

    async fn get_route(&self, id: RouteId) -> RepositoryResult<Option<Route>> {
        self.check_health("get_route")?;
        Ok(self.data.read().routes.get(&id).cloned())
    }

    async fn list_routes(&self, filter: &RouteFilter) -> RepositoryResult<Vec<Route>> {
        self.check_health("list_routes")?;
        let mut routes: Vec<Route> = self
            .data
            .read()
            .routes
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        routes.sort_by(|a, b| filter.compare(a, b));
        Ok(routes)
    }

    async fn store_route(&self, route: Route) -> RepositoryResult<RouteId> {
        self.check_health("store_route")?;
        Ok(self.store_route_impl(route))
    }
}

#[async_trait]
impl FlightRepository for LocalRepository {
    async fn get_flight(&self, id: &FlightId) -> RepositoryResult<Option<Flight>> {
        self.check_health("get_flight")?;
        Ok(self.data.read().flights.get(id).cloned())
    }

    async fn list_flights(
        &self,
        filter: &FlightFilter,
        page: Page,
    ) -> RepositoryResult<Vec<Flight>> {
        self.check_health("list_flights")?;
        Ok(page.apply(self.filtered_flights(filter)))
    }

    async fn count_flights(&self, filter: &FlightFilter) -> RepositoryResult<usize> {
        self.check_health("count_flights")?;
        Ok(self
            .data
            .read()
            .flights
            .values()
            .filter(|f| filter.matches(f))
            .count())
    }

    async fn recent_flights_for_route(
        &self,
        key: &RouteKey,
        limit: usize,
        exclude: Option<&FlightId>,
    ) -> RepositoryResult<Vec<Flight>> {
        self.check_health("recent_flights_for_route")?;
        let filter = FlightFilter {
            airline_iata: Some(key.airline_iata.clone()),
            departure_iata: Some(key.origin_iata.clone()),
            arrival_iata: Some(key.dest_iata.clone()),
            ..Default::default()
        };
        Ok(self
            .filtered_flights(&filter)
            .into_iter()
            .filter(|f| exclude != Some(&f.id))
            .take(limit)
            .collect())
    }

    async fn store_flight(&self, flight: Flight) -> RepositoryResult<FlightId> {
        self.check_health("store_flight")?;
        Ok(self.store_flight_impl(flight))
    }
}

#[async_trait]
impl IncidentRepository for LocalRepository {
    async fn list_incidents(&self, filter: &IncidentFilter) -> RepositoryResult<Vec<Incident>> {
        self.check_health("list_incidents")?;
        let mut incidents: Vec<Incident> = self
            .data
            .read()
            .incidents
            .values()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();
        incidents.sort_by_key(|i| (Reverse(i.date), i.id));
        if let Some(limit) = filter.limit {
            incidents.truncate(limit);
        }
        Ok(incidents)
    }

    async fn count_incidents(&self, filter: &IncidentFilter) -> RepositoryResult<usize> {
        self.check_health("count_incidents")?;
        Ok(self
            .data
            .read()
            .incidents
            .values()
            .filter(|i| filter.matches(i))
            .count())
    }

    async fn store_incident(&self, incident: Incident) -> RepositoryResult<IncidentId> {
        self.check_health("store_incident")?;
        Ok(self.store_incident_impl(incident))
    }
}
