//! Repository trait definitions for storage operations.
//!
//! Responsibilities are split across focused traits so that implementations
//! and test doubles stay small.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`network`]: Airlines, airports and route profiles
//! - [`flight`]: Recorded flights and same-route history
//! - [`incident`]: Airport disruption incidents
//!
//! # Convenience Trait Bound
//!
//! For code that needs every capability, use [`FullRepository`]:
//!
//! ```ignore
//! async fn flight_with_route<R: FullRepository + ?Sized>(
//!     repo: &R,
//!     id: &FlightId,
//! ) -> RepositoryResult<Option<(Flight, Option<Route>)>> {
//!     let Some(flight) = repo.get_flight(id).await? else {
//!         return Ok(None);
//!     };
//!     let route = repo.find_route(&flight.route_key()).await?;
//!     Ok(Some((flight, route)))
//! }
//! ```

pub mod error;
pub mod flight;
pub mod incident;
pub mod network;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use flight::FlightRepository;
pub use incident::IncidentRepository;
pub use network::NetworkRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements all three
/// repository traits.
pub trait FullRepository: NetworkRepository + FlightRepository + IncidentRepository {}

impl<T> FullRepository for T where T: NetworkRepository + FlightRepository + IncidentRepository {}
