//! Network reference repository: airlines, airports and routes.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::db::models::RouteFilter;
use crate::models::{Airline, Airport, Route, RouteId, RouteKey};

/// Repository trait for the static network reference data.
///
/// Key lookups return `Ok(None)` when the entity is absent; absence is never
/// reported as an error.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait NetworkRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the backing store is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Checksum of the data source the store was populated from, if known.
    fn dataset_checksum(&self) -> Option<String> {
        None
    }

    // ==================== Airlines ====================

    async fn get_airline(&self, iata: &str) -> RepositoryResult<Option<Airline>>;

    /// All airlines, ordered by on-time performance descending.
    async fn list_airlines(&self) -> RepositoryResult<Vec<Airline>>;

    /// Insert or replace an airline keyed by its IATA code.
    async fn store_airline(&self, airline: Airline) -> RepositoryResult<()>;

    // ==================== Airports ====================

    async fn get_airport(&self, iata: &str) -> RepositoryResult<Option<Airport>>;

    /// All airports, ordered by total flights descending.
    async fn list_airports(&self) -> RepositoryResult<Vec<Airport>>;

    /// Insert or replace an airport keyed by its IATA code.
    async fn store_airport(&self, airport: Airport) -> RepositoryResult<()>;

    // ==================== Routes ====================

    /// Find the route profile for an origin/destination/airline triple.
    async fn find_route(&self, key: &RouteKey) -> RepositoryResult<Option<Route>>;

    async fn get_route(&self, id: RouteId) -> RepositoryResult<Option<Route>>;

    /// Routes matching `filter`, ordered by its sort key.
    async fn list_routes(&self, filter: &RouteFilter) -> RepositoryResult<Vec<Route>>;

    /// Store a route. The incoming id is ignored and a fresh one assigned.
    ///
    /// # Returns
    /// * `Ok(RouteId)` - The id assigned by the store
    async fn store_route(&self, route: Route) -> RepositoryResult<RouteId>;
}
