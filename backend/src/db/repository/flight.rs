//! Flight repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::db::models::{FlightFilter, Page};
use crate::models::{Flight, FlightId, RouteKey};

/// Repository trait for recorded flights.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn get_flight(&self, id: &FlightId) -> RepositoryResult<Option<Flight>>;

    /// Flights matching `filter`, ordered by scheduled departure descending,
    /// restricted to `page`.
    async fn list_flights(&self, filter: &FlightFilter, page: Page)
        -> RepositoryResult<Vec<Flight>>;

    async fn count_flights(&self, filter: &FlightFilter) -> RepositoryResult<usize>;

    /// Most recent flights operating the same origin/destination/airline
    /// triple, newest first.
    ///
    /// # Arguments
    /// * `key` - The route triple
    /// * `limit` - Maximum number of flights returned
    /// * `exclude` - A flight to leave out (typically the one being inspected)
    async fn recent_flights_for_route(
        &self,
        key: &RouteKey,
        limit: usize,
        exclude: Option<&FlightId>,
    ) -> RepositoryResult<Vec<Flight>>;

    /// Insert or replace a flight keyed by its id.
    async fn store_flight(&self, flight: Flight) -> RepositoryResult<FlightId>;
}
